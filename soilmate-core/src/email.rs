//! "Meet your Soilmate" email content

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Plant, SHOP_URL};

const SUBJECT_TEMPLATES: [&str; 8] = [
    "🌱 Your amazing Soilmate: {name} is ready!",
    "🌿 Meet {name} - Your perfect plant companion!",
    "🪴 Your Soilmate {name} is waiting for you!",
    "🌱 {name} is your ideal plant match!",
    "🌿 Discover why {name} is your perfect Soilmate!",
    "🪴 Your plant soulmate {name} awaits!",
    "🌱 {name} - The plant that completes you!",
    "🌿 Your green companion {name} is here!",
];

/// Plant details shown in the email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantEmail {
    pub plant_name: String,
    pub plant_image: String,
    pub plant_description: String,
    pub plant_personality: String,
}

impl From<&Plant> for PlantEmail {
    fn from(plant: &Plant) -> Self {
        Self {
            plant_name: plant.name.clone(),
            plant_image: plant.image.clone(),
            plant_description: plant.description.clone(),
            plant_personality: plant.personality.clone(),
        }
    }
}

/// A rendered email ready for a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    /// Render the email for a recipient, picking a random subject line
    pub fn compose(to: impl Into<String>, plant: &PlantEmail) -> Self {
        Self::compose_with_rng(to, plant, &mut rand::thread_rng())
    }

    pub fn compose_with_rng<R: Rng + ?Sized>(
        to: impl Into<String>,
        plant: &PlantEmail,
        rng: &mut R,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject_line(&plant.plant_name, rng),
            html: render_html(plant),
        }
    }
}

/// Pick one of the subject line templates for a plant
pub fn subject_line<R: Rng + ?Sized>(plant_name: &str, rng: &mut R) -> String {
    let template = SUBJECT_TEMPLATES[rng.gen_range(0..SUBJECT_TEMPLATES.len())];
    template.replace("{name}", plant_name)
}

/// Escape text for interpolation into HTML body or attribute values
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f8fafc;
        }
        .container { background: white; border-radius: 16px; padding: 40px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }
        .header { text-align: center; margin-bottom: 30px; }
        .logo { font-size: 24px; font-weight: bold; color: #059669; margin-bottom: 10px; }
        .plant-image { width: 200px; height: 200px; border-radius: 50%; object-fit: cover; margin: 20px auto; display: block; }
        .plant-name { font-size: 32px; font-weight: bold; color: #059669; text-align: center; margin: 20px 0; }
        .plant-description { font-size: 18px; color: #6b7280; text-align: center; margin-bottom: 30px; }
        .personality-section { background: #f0fdf4; padding: 25px; border-radius: 12px; border-left: 4px solid #059669; margin: 25px 0; }
        .personality-title { font-size: 20px; font-weight: bold; color: #059669; margin-bottom: 15px; }
        .cta-button { display: inline-block; background: #059669; color: white; padding: 15px 30px; text-decoration: none; border-radius: 8px; font-weight: bold; margin: 20px 0; }
        .footer { text-align: center; margin-top: 40px; padding-top: 20px; border-top: 1px solid #e5e7eb; color: #6b7280; font-size: 14px; }
"#;

/// Render the HTML body
pub fn render_html(plant: &PlantEmail) -> String {
    let name = escape_html(&plant.plant_name);
    let image = escape_html(&plant.plant_image);
    let description = escape_html(&plant.plant_description);
    let personality = escape_html(&plant.plant_personality);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Your Soilmate Awaits!</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">🌱 Ekondo Soilmate</div>
            <h1>Your Perfect Plant Companion Awaits!</h1>
        </div>
        <img src="{image}" alt="{name}" class="plant-image" />
        <div class="plant-name">{name}</div>
        <div class="plant-description">{description}</div>
        <div class="personality-section">
            <div class="personality-title">🌿 What Your Soilmate Teaches You</div>
            <p>{personality}</p>
        </div>
        <div style="text-align: center;">
            <a href="{SHOP_URL}" class="cta-button">🌱 Adopt Your Soilmate</a>
        </div>
        <div class="footer">
            <p>Thank you for taking the Soilmate quiz! 🌱</p>
            <p>Keep this email to remember your perfect plant companion.</p>
            <p><strong>Ekondo</strong> - Connecting you with nature, one plant at a time.</p>
        </div>
    </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ids};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn snake_plant() -> PlantEmail {
        PlantEmail::from(Catalog::standard().get(ids::SNAKE_PLANT).unwrap())
    }

    #[test]
    fn subject_mentions_plant() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let subject = subject_line("Snake Plant", &mut rng);
            assert!(subject.contains("Snake Plant"), "{}", subject);
            assert!(!subject.contains("{name}"));
        }
    }

    #[test]
    fn subject_is_stable_for_a_seed() {
        let first = subject_line("Syngonium", &mut StdRng::seed_from_u64(42));
        let second = subject_line("Syngonium", &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn html_contains_plant_details() {
        let plant = snake_plant();
        let html = render_html(&plant);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div class="plant-name">Snake Plant</div>"#));
        assert!(html.contains(&plant.plant_image));
        assert!(html.contains("ultimate survivor"));
        assert!(html.contains(SHOP_URL));
    }

    #[test]
    fn html_escapes_interpolated_values() {
        let plant = PlantEmail {
            plant_name: "<script>alert(1)</script>".to_string(),
            plant_image: "\" onerror=\"x".to_string(),
            plant_description: "Tom & Jerry".to_string(),
            plant_personality: "it's fine".to_string(),
        };
        let html = render_html(&plant);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&quot; onerror=&quot;x"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("it&#39;s fine"));
    }

    #[test]
    fn compose_fills_all_parts() {
        let message =
            EmailMessage::compose_with_rng("ana@example.com", &snake_plant(), &mut StdRng::seed_from_u64(1));
        assert_eq!(message.to, "ana@example.com");
        assert!(message.subject.contains("Snake Plant"));
        assert!(message.html.contains("Snake Plant"));
    }
}
