/// Static deal template, one synthetic product offer per entry.
pub struct DealTemplate {
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub category: &'static str,
    pub original_price: &'static str,
    pub discount_percentage: i32,
}

const fn t(
    title: &'static str,
    category: &'static str,
    original_price: &'static str,
    discount_percentage: i32,
) -> DealTemplate {
    DealTemplate {
        title,
        description: None,
        category,
        original_price,
        discount_percentage,
    }
}

pub const AMAZON: &[DealTemplate] = &[
    t("Sony WH-CH720N Noise Canceling Headphones", "Electronics", "9990", 40),
    t("Fire TV Stick 4K Max", "Electronics", "6999", 35),
    t("Echo Dot (5th Gen)", "Smart Home", "5499", 45),
];

pub const FLIPKART: &[DealTemplate] = &[
    t("Samsung Galaxy M34", "Mobile", "18999", 25),
    t("Noise ColorFit Pro 4", "Wearables", "4999", 50),
    t("boAt Airdopes 131", "Audio", "2999", 60),
];

pub const ZEPTO: &[DealTemplate] = &[
    t("Fresh Vegetables Bundle", "Groceries", "500", 30),
    t("Dairy Products Combo", "Food", "800", 25),
    t("Snacks & Beverages Pack", "Food", "1200", 20),
];

pub const SWIGGY: &[DealTemplate] = &[
    t("Pizza Combo Meal", "Food", "899", 40),
    t("Biryani Special", "Food", "349", 30),
    t("Burger & Fries Combo", "Food", "299", 50),
];

pub const ZOMATO: &[DealTemplate] = &[
    t("Restaurant Week Special", "Dining", "1500", 35),
    t("Happy Hours Drinks", "Beverages", "800", 45),
    t("Weekend Brunch Deal", "Food", "1200", 25),
];

pub const AJIO: &[DealTemplate] = &[
    t("Designer Kurta Set", "Fashion", "2999", 55),
    t("Sneakers Collection", "Footwear", "3499", 40),
    t("Casual Shirts Pack", "Fashion", "1999", 60),
];

/// Fallback for platforms without a dedicated table.
pub const GENERIC: &[DealTemplate] = &[
    DealTemplate {
        title: "Premium Wireless Earbuds",
        description: Some("High-quality sound with noise cancellation"),
        category: "Electronics",
        original_price: "4999",
        discount_percentage: 40,
    },
    DealTemplate {
        title: "Smart Fitness Watch",
        description: Some("Track your health and fitness goals"),
        category: "Wearables",
        original_price: "8999",
        discount_percentage: 35,
    },
    DealTemplate {
        title: "Bluetooth Speaker",
        description: Some("Portable speaker with powerful bass"),
        category: "Electronics",
        original_price: "2999",
        discount_percentage: 45,
    },
    DealTemplate {
        title: "Running Shoes",
        description: Some("Comfortable running shoes for all terrains"),
        category: "Sports",
        original_price: "5999",
        discount_percentage: 30,
    },
    DealTemplate {
        title: "Coffee Maker",
        description: Some("Automatic coffee maker with grinder"),
        category: "Home & Kitchen",
        original_price: "12999",
        discount_percentage: 25,
    },
];

/// Template table for a platform's internal name, falling back to the
/// generic product list for unknown platforms.
pub fn for_platform(name: &str) -> &'static [DealTemplate] {
    match name {
        "amazon" => AMAZON,
        "flipkart" => FLIPKART,
        "zepto" => ZEPTO,
        "swiggy" => SWIGGY,
        "zomato" => ZOMATO,
        "ajio" => AJIO,
        _ => GENERIC,
    }
}
