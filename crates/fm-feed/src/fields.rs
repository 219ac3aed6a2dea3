//! Column-to-field mapping for tabular ingredient lists.
//!
//! Headers are matched case-insensitively after trimming whitespace and
//! quotes. Both the snake_case English headers and the Arabic display headers
//! of the original spreadsheets are accepted.

use crate::ingredient::{Ingredient, IngredientCategory};
use crate::nutrient::Nutrient;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngredientField {
    Name,
    Description,
    Category,
    Inclusion,
    Price,
    Nutrient(Nutrient),
}

const ARABIC_HEADERS: [(&str, IngredientField); 26] = [
    ("الاسم", IngredientField::Name),
    ("الوصف", IngredientField::Description),
    ("الفئة", IngredientField::Category),
    ("نسبة الإدراج %", IngredientField::Inclusion),
    ("سعر ($/طن)", IngredientField::Price),
    ("بروتين خام %", IngredientField::Nutrient(Nutrient::CrudeProtein)),
    ("طاقة ME (kcal/kg)", IngredientField::Nutrient(Nutrient::MetabolizableEnergy)),
    ("كالسيوم %", IngredientField::Nutrient(Nutrient::Calcium)),
    ("فوسفور متاح %", IngredientField::Nutrient(Nutrient::AvailablePhosphorus)),
    ("صوديوم %", IngredientField::Nutrient(Nutrient::Sodium)),
    ("بوتاسيوم %", IngredientField::Nutrient(Nutrient::Potassium)),
    ("كلور %", IngredientField::Nutrient(Nutrient::Chloride)),
    ("لايسين %", IngredientField::Nutrient(Nutrient::Lysine)),
    ("ميثيونين+سيستين %", IngredientField::Nutrient(Nutrient::MethionineCystine)),
    ("ثريونين %", IngredientField::Nutrient(Nutrient::Threonine)),
    ("فالين %", IngredientField::Nutrient(Nutrient::Valine)),
    ("آيزولوسين %", IngredientField::Nutrient(Nutrient::Isoleucine)),
    ("لوسين %", IngredientField::Nutrient(Nutrient::Leucine)),
    ("أرجنين %", IngredientField::Nutrient(Nutrient::Arginine)),
    ("تريبتوفان %", IngredientField::Nutrient(Nutrient::Tryptophan)),
    ("نشا %", IngredientField::Nutrient(Nutrient::Starch)),
    ("ألياف خام %", IngredientField::Nutrient(Nutrient::CrudeFiber)),
    ("NDF %", IngredientField::Nutrient(Nutrient::NeutralDetergentFiber)),
    ("ADF %", IngredientField::Nutrient(Nutrient::AcidDetergentFiber)),
    ("رماد %", IngredientField::Nutrient(Nutrient::Ash)),
    ("كولين (mg/kg)", IngredientField::Nutrient(Nutrient::Choline)),
];

impl IngredientField {
    /// Column order used when writing an ingredient table.
    pub fn export_order() -> Vec<IngredientField> {
        let mut order = vec![
            IngredientField::Name,
            IngredientField::Inclusion,
            IngredientField::Price,
        ];
        order.extend(Nutrient::ALL.into_iter().map(IngredientField::Nutrient));
        order.push(IngredientField::Category);
        order.push(IngredientField::Description);
        order
    }

    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim().trim_matches('"').trim();
        if header.is_empty() {
            return None;
        }

        let english = match header.to_ascii_lowercase().as_str() {
            "name" => Some(IngredientField::Name),
            "description" => Some(IngredientField::Description),
            "category" => Some(IngredientField::Category),
            "inclusion_pct" => Some(IngredientField::Inclusion),
            "price_usd_per_ton" => Some(IngredientField::Price),
            other => Nutrient::from_key_ignore_case(other).map(IngredientField::Nutrient),
        };

        english.or_else(|| {
            let lowered = header.to_lowercase();
            ARABIC_HEADERS
                .iter()
                .find(|(h, _)| h.to_lowercase() == lowered)
                .map(|(_, field)| *field)
        })
    }

    /// Header written on export.
    pub fn header(self) -> String {
        match self {
            IngredientField::Name => "name".to_string(),
            IngredientField::Description => "description".to_string(),
            IngredientField::Category => "category".to_string(),
            IngredientField::Inclusion => "inclusion_pct".to_string(),
            IngredientField::Price => "price_usd_per_ton".to_string(),
            IngredientField::Nutrient(n) => n.key().to_ascii_lowercase(),
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            IngredientField::Name | IngredientField::Description | IngredientField::Category
        )
    }

    /// Write a cell value into `ingredient`.
    ///
    /// Numeric cells that do not parse read as 0; unknown categories fall back
    /// to [`IngredientCategory::Other`].
    pub fn apply(self, ingredient: &mut Ingredient, raw: &str) {
        let value = raw.trim().trim_matches('"').trim();
        match self {
            IngredientField::Name => ingredient.name = value.to_string(),
            IngredientField::Description => ingredient.description = value.to_string(),
            IngredientField::Category => {
                ingredient.category = value.parse().unwrap_or_else(|_| {
                    if !value.is_empty() {
                        debug!(
                            category = value,
                            ingredient = %ingredient.name,
                            "unknown category, using Other"
                        );
                    }
                    IngredientCategory::Other
                })
            }
            IngredientField::Inclusion => ingredient.inclusion_pct = parse_number(value),
            IngredientField::Price => ingredient.price_usd_per_ton = parse_number(value),
            IngredientField::Nutrient(n) => ingredient.nutrients.set(n, parse_number(value)),
        }
    }

    /// Read the cell value for this field from `ingredient`.
    pub fn read(self, ingredient: &Ingredient) -> String {
        match self {
            IngredientField::Name => ingredient.name.clone(),
            IngredientField::Description => ingredient.description.clone(),
            IngredientField::Category => ingredient.category.name().to_string(),
            IngredientField::Inclusion => ingredient.inclusion_pct.to_string(),
            IngredientField::Price => ingredient.price_usd_per_ton.to_string(),
            IngredientField::Nutrient(n) => ingredient.nutrient(n).to_string(),
        }
    }
}

fn parse_number(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::IngredientId;

    #[test]
    fn english_headers_ignore_case_and_quotes() {
        assert_eq!(
            IngredientField::from_header(" \"Name\" "),
            Some(IngredientField::Name)
        );
        assert_eq!(
            IngredientField::from_header("CP_PCT"),
            Some(IngredientField::Nutrient(Nutrient::CrudeProtein))
        );
        assert_eq!(
            IngredientField::from_header("Price_USD_per_ton"),
            Some(IngredientField::Price)
        );
        assert_eq!(IngredientField::from_header("fat_pct"), None);
        assert_eq!(IngredientField::from_header(""), None);
    }

    #[test]
    fn arabic_headers_map_to_fields() {
        assert_eq!(
            IngredientField::from_header("نسبة الإدراج %"),
            Some(IngredientField::Inclusion)
        );
        assert_eq!(
            IngredientField::from_header("ndf %"),
            Some(IngredientField::Nutrient(Nutrient::NeutralDetergentFiber))
        );
    }

    #[test]
    fn export_order_round_trips_through_headers() {
        let order = IngredientField::export_order();
        assert_eq!(order.len(), 5 + Nutrient::COUNT);
        for field in order {
            assert_eq!(IngredientField::from_header(&field.header()), Some(field));
        }
    }

    #[test]
    fn apply_parses_numbers_leniently() {
        let mut ing = Ingredient::new(IngredientId::from_index(0), "");
        IngredientField::Inclusion.apply(&mut ing, "12.5");
        IngredientField::Price.apply(&mut ing, "n/a");
        IngredientField::Nutrient(Nutrient::Ash).apply(&mut ing, "\"3\"");
        IngredientField::Category.apply(&mut ing, "Vitamins");

        assert_eq!(ing.inclusion_pct, 12.5);
        assert_eq!(ing.price_usd_per_ton, 0.0);
        assert_eq!(ing.nutrient(Nutrient::Ash), 3.0);
        assert_eq!(ing.category, IngredientCategory::Other);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unknown_category_is_logged_and_falls_back() {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();

        let mut ing = Ingredient::new(IngredientId::from_index(0), "Premix");
        tracing::subscriber::with_default(subscriber, || {
            IngredientField::Category.apply(&mut ing, "Vitamins");
            IngredientField::Category.apply(&mut ing, "protein");
        });
        assert_eq!(ing.category, IngredientCategory::Protein);

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("unknown category"), "{logs}");
        assert!(logs.contains("Vitamins"), "{logs}");
        assert_eq!(logs.matches("unknown category").count(), 1, "{logs}");
    }
}
