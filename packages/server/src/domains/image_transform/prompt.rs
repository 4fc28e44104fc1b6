//! Edit instructions for the image model.

use super::models::TrendInfo;

const PREAMBLE: &str = "Convert this image to apply the following beauty trend style while keeping the person's identity and overall composition the same:";

const CLOSING: &str = "Maintain natural lighting, realistic appearance, and the person's natural beauty. The transformation should look professional and authentic.";

/// What to change and what to leave alone for one trend category.
struct CategoryClauses {
    modify: &'static str,
    preserve: &'static str,
}

fn category_clauses(category: &str) -> Option<CategoryClauses> {
    match category {
        "makeup" => Some(CategoryClauses {
            modify: "Focus ONLY on makeup application, color coordination, and facial enhancement. \
                     Modify: foundation, concealer, eyeshadow, eyeliner, mascara, lipstick, blush, contour, highlight. \
                     Apply the trend's specific makeup style and color palette.",
            preserve: "PRESERVE EXACTLY: hair style, hair color, hair texture, skin tone, facial features, \
                       eye color, eyebrow shape, and overall skin texture. Do not change hairstyle or hair appearance.",
        }),
        "skincare" => Some(CategoryClauses {
            modify: "Focus ONLY on skin texture, glow, and healthy skin appearance. \
                     Modify: skin finish, skin glow, skin texture, skin hydration appearance, skin smoothness. \
                     Apply the trend's specific skincare finish and glow effect.",
            preserve: "PRESERVE EXACTLY: makeup application, hair style, hair color, hair texture, facial features, \
                       eye color, eyebrow shape, and lip color. Do not change makeup or hair appearance.",
        }),
        "hair" => Some(CategoryClauses {
            modify: "Focus ONLY on hairstyle, hair texture, and hair color/styling. \
                     Modify: hair cut, hair style, hair texture, hair color, hair volume, hair movement. \
                     Apply the trend's specific hairstyle and hair characteristics.",
            preserve: "PRESERVE EXACTLY: makeup application, skin tone, facial features, eye color, \
                       eyebrow shape, lip color, and overall skin appearance. Do not change makeup or skin appearance.",
        }),
        _ => None,
    }
}

/// Build the edit instruction for a trend.
///
/// The layout is fixed, so a trend without techniques or with an unknown
/// category still leaves its (empty) slots and separators in place.
pub fn create_beauty_prompt(trend: &TrendInfo) -> String {
    let techniques = if trend.techniques.is_empty() {
        String::new()
    } else {
        format!(
            "Use these specific techniques: {}",
            trend.techniques.join(", ")
        )
    };

    let (modify, preserve) = category_clauses(&trend.category)
        .map(|c| (c.modify, c.preserve))
        .unwrap_or(("", ""));

    format!(
        "{} Apply the '{}' trend: {}. {}. {} {} {}",
        PREAMBLE, trend.name, trend.description, techniques, modify, preserve, CLOSING
    )
}
