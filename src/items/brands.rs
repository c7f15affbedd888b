/// Label used when a name matches no rule and has no usable first word.
pub const OTHER_BRAND: &str = "Other Products";

/// How a rule keyword is matched against a lowercased product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Keyword appears anywhere in the name
    Substring(&'static str),
    /// Keyword is one whole whitespace-delimited word of the name
    Word(&'static str),
}

impl Matcher {
    fn matches(self, lowered: &str) -> bool {
        match self {
            Matcher::Substring(key) => lowered.contains(key),
            Matcher::Word(key) => lowered.split_whitespace().any(|word| word == key),
        }
    }
}

/// One classifier rule: any matcher hitting assigns `label`.
#[derive(Debug, Clone, Copy)]
pub struct BrandRule {
    pub matchers: &'static [Matcher],
    pub label: &'static str,
}

use Matcher::{Substring, Word};

/// Ordered rule table, first match wins.
///
/// Short keys that occur inside unrelated words ("mi", "lg", "hp") are matched
/// as whole words only, so "Minutemaid" or "Kimi" never classify as Xiaomi.
pub const BRAND_RULES: &[BrandRule] = &[
    // Phones
    BrandRule { matchers: &[Substring("xiaomi"), Substring("redmi"), Word("mi")], label: "Xiaomi/Redmi/Mi" },
    BrandRule { matchers: &[Substring("realme")], label: "Realme" },
    BrandRule { matchers: &[Substring("samsung")], label: "Samsung" },
    BrandRule { matchers: &[Substring("iphone"), Substring("apple")], label: "Apple" },
    BrandRule { matchers: &[Substring("vivo")], label: "Vivo" },
    BrandRule { matchers: &[Substring("oppo")], label: "Oppo" },
    BrandRule { matchers: &[Substring("oneplus")], label: "OnePlus" },
    BrandRule { matchers: &[Substring("nokia")], label: "Nokia" },
    BrandRule { matchers: &[Substring("motorola"), Substring("moto")], label: "Motorola" },
    BrandRule { matchers: &[Substring("poco")], label: "POCO" },
    // Snacks
    BrandRule { matchers: &[Substring("lays"), Substring("lay's")], label: "Lays" },
    BrandRule { matchers: &[Substring("kurkure")], label: "Kurkure" },
    BrandRule { matchers: &[Substring("bingo")], label: "Bingo" },
    BrandRule { matchers: &[Substring("doritos")], label: "Doritos" },
    BrandRule { matchers: &[Substring("pringles")], label: "Pringles" },
    BrandRule { matchers: &[Substring("cheetos")], label: "Cheetos" },
    BrandRule { matchers: &[Substring("haldiram")], label: "Haldirams" },
    BrandRule { matchers: &[Substring("bikaji")], label: "Bikaji" },
    // Beverages
    BrandRule { matchers: &[Substring("coca cola"), Substring("coke")], label: "Coca Cola" },
    BrandRule { matchers: &[Substring("pepsi")], label: "Pepsi" },
    BrandRule { matchers: &[Substring("sprite")], label: "Sprite" },
    BrandRule { matchers: &[Substring("fanta")], label: "Fanta" },
    BrandRule { matchers: &[Substring("mountain dew")], label: "Mountain Dew" },
    BrandRule { matchers: &[Substring("thumbs up")], label: "Thumbs Up" },
    BrandRule { matchers: &[Substring("limca")], label: "Limca" },
    // Electronics
    BrandRule { matchers: &[Substring("sony")], label: "Sony" },
    BrandRule { matchers: &[Word("lg")], label: "LG" },
    BrandRule { matchers: &[Substring("dell")], label: "Dell" },
    BrandRule { matchers: &[Word("hp")], label: "HP" },
    BrandRule { matchers: &[Substring("lenovo")], label: "Lenovo" },
    BrandRule { matchers: &[Substring("asus")], label: "Asus" },
    BrandRule { matchers: &[Substring("acer")], label: "Acer" },
];

/// Classify a product name into a brand label.
pub fn classify_brand(name: &str) -> String {
    let lowered = name.to_lowercase();

    if let Some(rule) = BRAND_RULES
        .iter()
        .find(|rule| rule.matchers.iter().any(|m| m.matches(&lowered)))
    {
        return rule.label.to_string();
    }

    match name.split_whitespace().next() {
        Some(first) if first.chars().count() > 2 => first.to_string(),
        _ => OTHER_BRAND.to_string(),
    }
}
