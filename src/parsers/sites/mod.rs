mod alexandras_kitchen;
mod allrecipes;
mod damn_delicious;
mod epicurious;
mod food52;
mod food_and_wine;
mod food_network;
mod json_ld;
mod love_and_lemons;
mod nyt_cooking;
mod serious_eats;
mod smitten_kitchen;
mod washington_post;

pub use self::alexandras_kitchen::AlexandrasKitchenParser;
pub use self::allrecipes::AllrecipesParser;
pub use self::damn_delicious::DamnDeliciousParser;
pub use self::epicurious::EpicuriousParser;
pub use self::food52::Food52Parser;
pub use self::food_and_wine::FoodAndWineParser;
pub use self::food_network::FoodNetworkParser;
pub use self::json_ld::JsonLdParser;
pub use self::love_and_lemons::LoveAndLemonsParser;
pub use self::nyt_cooking::NytCookingParser;
pub use self::serious_eats::SeriousEatsParser;
pub use self::smitten_kitchen::SmittenKitchenParser;
pub use self::washington_post::WashingtonPostParser;

use super::SiteParser;

/// Every site parser, in registration order.
pub fn all() -> Vec<Box<dyn SiteParser>> {
    vec![
        Box::new(SmittenKitchenParser),
        Box::new(FoodNetworkParser),
        Box::new(NytCookingParser),
        Box::new(AllrecipesParser),
        Box::new(LoveAndLemonsParser),
        Box::new(Food52Parser),
        Box::new(EpicuriousParser),
        Box::new(WashingtonPostParser),
        Box::new(FoodAndWineParser),
        Box::new(DamnDeliciousParser),
        Box::new(SeriousEatsParser),
        Box::new(AlexandrasKitchenParser),
    ]
}
