use serde::Serialize;

use super::PresentationConfig;

/// Marker appended to shortened labels.
pub const ELLIPSIS: &str = "…";

/// Label font sizes for one box (px).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSizes {
    pub name: f32,
    pub percentage: f32,
}

/// Pick font sizes from the box area, shrinking both when the box is thin.
pub fn font_sizes(width: f64, height: f64, config: &PresentationConfig) -> FontSizes {
    let area = width * height;
    let tier = config
        .font_area_thresholds
        .iter()
        .position(|&t| area < t)
        .unwrap_or(config.font_area_thresholds.len());

    let mut name = config.name_font_sizes[tier];
    let mut percentage = name * config.percent_font_scales[tier];

    if width.min(height) < config.small_dimension {
        name = (name * config.small_dimension_scale).max(config.min_font_size);
        percentage = (percentage * config.small_dimension_scale).max(config.min_font_size);
    }

    FontSizes { name, percentage }
}

/// How many characters of `font_size` fit across a box of `width`.
pub fn max_chars(width: f64, font_size: f32, config: &PresentationConfig) -> usize {
    let usable = (width - 2.0 * config.label_padding).max(0.0);
    let char_width = font_size as f64 * config.char_width_factor;
    if char_width <= 0.0 {
        return 0;
    }
    (usable / char_width).floor() as usize
}

/// Shorten `name` to fit `max_chars`.
///
/// Very narrow boxes get a short abbreviation. Otherwise the cut backs off to
/// the last word boundary when one exists past the middle of the budget.
pub fn truncate_label(name: &str, max_chars: usize, config: &PresentationConfig) -> String {
    let len = name.chars().count();

    if max_chars < config.min_label_chars {
        if len <= config.abbreviation_chars {
            return name.to_string();
        }
        let abbreviation: String = name.chars().take(config.abbreviation_chars).collect();
        return format!("{}{ELLIPSIS}", abbreviation.trim_end());
    }

    if len <= max_chars {
        return name.to_string();
    }

    // keep one slot for the ellipsis
    let budget = max_chars.saturating_sub(1);
    if budget == 0 {
        return ELLIPSIS.to_string();
    }
    let prefix: String = name.chars().take(budget).collect();
    let cut = match prefix.rfind(' ') {
        Some(space) if prefix[..space].chars().count() > max_chars / 2 => &prefix[..space],
        _ => prefix.as_str(),
    };
    format!("{}{ELLIPSIS}", cut.trim_end())
}

/// Display text for a box of `width` at `font_size`.
pub fn label_for(name: &str, width: f64, font_size: f32, config: &PresentationConfig) -> String {
    truncate_label(name, max_chars(width, font_size, config), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PresentationConfig {
        PresentationConfig::default()
    }

    #[test]
    fn font_tiers_grow_with_area() {
        let c = config();
        let small = font_sizes(70.0, 70.0, &c); // 4900 px²
        let large = font_sizes(300.0, 200.0, &c); // 60000 px²
        assert_eq!(small.name, 8.0);
        assert_eq!(large.name, 14.0);
        assert!(large.percentage > small.percentage);
        assert!((large.percentage - 14.0 * 1.6).abs() < 1e-4);
    }

    #[test]
    fn every_tier_is_reachable() {
        let c = config();
        let names: Vec<f32> = [4_000.0, 6_000.0, 10_000.0, 20_000.0, 30_000.0, 50_000.0]
            .iter()
            .map(|&area: &f64| {
                let side = area.sqrt();
                font_sizes(side, side, &c).name
            })
            .collect();
        assert_eq!(names, [8.0, 9.0, 10.0, 11.0, 12.0, 14.0]);
    }

    #[test]
    fn thin_boxes_shrink_fonts() {
        let c = config();
        // same area, one side under 60px
        let square = font_sizes(180.0, 180.0, &c);
        let thin = font_sizes(648.0, 50.0, &c);
        assert_eq!(square.name, 12.0);
        assert!(thin.name < square.name);
        assert!(thin.percentage < square.percentage);
        assert!(thin.name >= c.min_font_size);
    }

    #[test]
    fn short_names_fit_verbatim() {
        assert_eq!(truncate_label("Pepsi", 10, &config()), "Pepsi");
    }

    #[test]
    fn long_names_cut_at_word_boundary() {
        // budget 11 -> "Samsung Gal", last space at 7 > 12 / 2
        assert_eq!(truncate_label("Samsung Galaxy A54", 12, &config()), "Samsung…");
    }

    #[test]
    fn hard_cut_when_no_late_boundary() {
        // budget 7 -> "Coca Co", space at 4 is not past 8 / 2
        assert_eq!(truncate_label("Coca Cola Zero", 8, &config()), "Coca Co…");
        assert_eq!(truncate_label("Haldiramsnacks", 6, &config()), "Haldi…");
    }

    #[test]
    fn narrow_boxes_get_abbreviations() {
        assert_eq!(truncate_label("Kurkure Masala", 4, &config()), "Kur…");
        assert_eq!(truncate_label("LG", 2, &config()), "LG");
        assert_eq!(truncate_label("Mi Band", 3, &config()), "Mi…");
    }

    #[test]
    fn zero_budget_without_abbreviation_is_just_the_ellipsis() {
        let c = PresentationConfig {
            min_label_chars: 0,
            ..config()
        };
        assert_eq!(truncate_label("Pepsi", 0, &c), ELLIPSIS);
        assert_eq!(truncate_label("Pepsi", 1, &c), ELLIPSIS);
        assert_eq!(truncate_label("Pepsi", 2, &c), "P…");
        assert_eq!(label_for("Pepsi", 5.0, 10.0, &c), ELLIPSIS);
    }

    #[test]
    fn char_budget_uses_padding_and_char_width() {
        let c = config();
        // (100 - 8) / (10 * 0.6) = 15.3
        assert_eq!(max_chars(100.0, 10.0, &c), 15);
        assert_eq!(max_chars(5.0, 10.0, &c), 0);
        assert_eq!(label_for("Thumbs Up 750ml", 100.0, 10.0, &c), "Thumbs Up 750ml");
    }
}
