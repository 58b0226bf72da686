//! Emoji lookup for Places `primaryType` values.
//!
//! Purely presentational: gives the UI one to three emoji per place category.
//! Unknown food-related types fall back to the generic plate.

/// Returns up to three emoji for a Places `primaryType` key.
///
/// `None` yields an empty slice; an unrecognized type yields the generic `🍽️`.
#[must_use]
pub fn icons_for_primary_type(primary_type: Option<&str>) -> &'static [&'static str] {
    let Some(primary_type) = primary_type else {
        return &[];
    };
    lookup(primary_type.trim().to_lowercase().as_str())
}

fn lookup(key: &str) -> &'static [&'static str] {
    match key {
        "acai_shop" => &["🥤"],
        "afghani_restaurant" | "african_restaurant" | "korean_restaurant"
        | "spanish_restaurant" => &["🥘"],
        "american_restaurant" | "hamburger_restaurant" => &["🍔"],
        "asian_restaurant" => &["🥢"],
        "bagel_shop" => &["🥯"],
        "bakery" => &["🥐"],
        "bar" => &["🍸"],
        "bar_and_grill" | "barbecue_restaurant" => &["🍖"],
        "brazilian_restaurant" => &["🥩"],
        "breakfast_restaurant" => &["🍳"],
        "brunch_restaurant" => &["🥞"],
        "buffet_restaurant" | "cafeteria" | "diner" | "restaurant" => &["🍽️"],
        "cafe" | "coffee_shop" => &["☕"],
        "candy_store" => &["🍬"],
        "cat_cafe" => &["🐱"],
        "chinese_restaurant" => &["🥟"],
        "chocolate_factory" | "chocolate_shop" => &["🍫"],
        "confectionery" | "dessert_restaurant" => &["🍰"],
        "deli" | "sandwich_shop" => &["🥪"],
        "dessert_shop" | "ice_cream_shop" => &["🍨"],
        "dog_cafe" => &["🐶"],
        "donut_shop" => &["🍩"],
        "fast_food_restaurant" => &["🍟"],
        "fine_dining_restaurant" => &["🍷"],
        "food_court" => &["🛍️"],
        "french_restaurant" => &["🥖"],
        "greek_restaurant" | "turkish_restaurant" => &["🥙"],
        "indian_restaurant" | "indonesian_restaurant" => &["🍛"],
        "italian_restaurant" => &["🍝"],
        "japanese_restaurant" => &["🍱", "🍣", "🍶"],
        "juice_shop" => &["🧃"],
        "lebanese_restaurant" | "middle_eastern_restaurant" => &["🧆"],
        "meal_delivery" => &["🚚"],
        "meal_takeaway" => &["🥡"],
        "mediterranean_restaurant" => &["🫒"],
        "mexican_restaurant" => &["🌮", "🌯", "🥑"],
        "pizza_restaurant" => &["🍕", "🧀"],
        "pub" => &["🍻", "🍺"],
        "ramen_restaurant" => &["🍜", "🥟", "🥚"],
        "seafood_restaurant" => &["🐟", "🦐", "🦑"],
        "steak_house" => &["🥩", "🍷"],
        "sushi_restaurant" => &["🍣", "🍶", "🐟"],
        "tea_house" => &["🫖"],
        "thai_restaurant" => &["🌶️", "🍜"],
        "vegan_restaurant" => &["🥗", "🌿"],
        "vegetarian_restaurant" => &["🥗", "🥦"],
        "vietnamese_restaurant" => &["🍜", "🥟", "🥬"],
        "wine_bar" => &["🍷", "🧀"],
        _ => &["🍽️"],
    }
}
