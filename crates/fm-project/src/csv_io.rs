//! Ingredient lists as CSV.
//!
//! Import accepts comma or semicolon separated files with English or Arabic
//! headers (see [`IngredientField::from_header`]). Unknown columns are
//! ignored; a name column is required. Export always writes the English
//! headers in [`IngredientField::export_order`].

use crate::{ProjectError, ProjectResult};
use fm_core::IngredientId;
use fm_feed::{Ingredient, IngredientField};
use std::io::Write;
use std::path::Path;
use tracing::debug;

const BOM: char = '\u{feff}';

/// `;` when the header line contains one, `,` otherwise.
fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    if header.contains(';') { b';' } else { b',' }
}

/// Parse CSV text into new ingredients.
///
/// Ids continue after the largest id in `existing`. Rows with every cell
/// empty are skipped.
pub fn import_ingredients(text: &str, existing: &[Ingredient]) -> ProjectResult<Vec<Ingredient>> {
    let text = text.trim_start_matches(BOM).trim();
    if text.lines().count() < 2 {
        return Err(ProjectError::EmptyCsv);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(detect_delimiter(text))
        .from_reader(text.as_bytes());

    let columns: Vec<Option<IngredientField>> = reader
        .headers()?
        .iter()
        .map(IngredientField::from_header)
        .collect();
    if !columns.contains(&Some(IngredientField::Name)) {
        return Err(ProjectError::MissingNameColumn);
    }

    let mut next_id = IngredientId::next_after(existing.iter().map(|i| i.id));
    let mut imported = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            debug!(row = row + 1, "skipping empty CSV row");
            continue;
        }

        let mut ingredient = Ingredient::new(next_id, "");
        for (field, cell) in columns.iter().zip(record.iter()) {
            if let Some(field) = field {
                field.apply(&mut ingredient, cell);
            }
        }
        next_id = IngredientId::next_after([next_id]);
        imported.push(ingredient);
    }

    debug!(count = imported.len(), "ingredients imported from CSV");
    Ok(imported)
}

pub fn read_csv(path: &Path, existing: &[Ingredient]) -> ProjectResult<Vec<Ingredient>> {
    let text = std::fs::read_to_string(path)?;
    import_ingredients(&text, existing)
}

/// Write `ingredients` as CSV with English headers.
pub fn export_ingredients<W: Write>(writer: W, ingredients: &[Ingredient]) -> ProjectResult<()> {
    let order = IngredientField::export_order();
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(order.iter().map(|f| f.header()))?;
    for ing in ingredients {
        writer.write_record(order.iter().map(|f| f.read(ing)))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, ingredients: &[Ingredient]) -> ProjectResult<()> {
    let file = std::fs::File::create(path)?;
    export_ingredients(file, ingredients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_feed::{IngredientCategory, Nutrient, catalog};

    #[test]
    fn semicolon_file_with_arabic_headers() {
        let text = "\u{feff}الاسم;نسبة الإدراج %;بروتين خام %;الفئة\n\
                    ذرة صفراء;60;7.8;Energy\n\
                    كسب صويا;30;44;Protein\n";
        let imported = import_ingredients(text, &[]).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].name, "ذرة صفراء");
        assert_eq!(imported[0].inclusion_pct, 60.0);
        assert_eq!(imported[1].nutrient(Nutrient::CrudeProtein), 44.0);
        assert_eq!(imported[1].category, IngredientCategory::Protein);
        assert_eq!(imported[0].id.get(), 1);
        assert_eq!(imported[1].id.get(), 2);
    }

    #[test]
    fn ids_continue_after_existing() {
        let existing = catalog::starter_mix();
        let max = existing.iter().map(|i| i.id.get()).max().unwrap();
        let imported = import_ingredients("name,cp_pct\nA,1\nB,2\n", &existing).unwrap();
        assert_eq!(imported[0].id.get(), max + 1);
        assert_eq!(imported[1].id.get(), max + 2);
    }

    #[test]
    fn lenient_cells_and_unknown_columns() {
        let text = "Name,Inclusion_pct,fat_pct,category\n\
                    \"Premix\",abc,12,Vitamins\n\
                    ,,,\n\
                    Salt,0.3\n";
        let imported = import_ingredients(text, &[]).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].name, "Premix");
        assert_eq!(imported[0].inclusion_pct, 0.0);
        assert_eq!(imported[0].category, IngredientCategory::Other);
        assert_eq!(imported[1].inclusion_pct, 0.3);
    }

    #[test]
    fn name_column_is_required() {
        let err = import_ingredients("cp_pct,ash_pct\n1,2\n", &[]).unwrap_err();
        assert!(matches!(err, ProjectError::MissingNameColumn));
    }

    #[test]
    fn header_only_is_rejected() {
        assert!(matches!(
            import_ingredients("name,cp_pct\n", &[]),
            Err(ProjectError::EmptyCsv)
        ));
    }

    #[test]
    fn export_then_import_keeps_values() {
        let mix = catalog::starter_mix();
        let mut buf = Vec::new();
        export_ingredients(&mut buf, &mix).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("name,inclusion_pct,price_usd_per_ton,cp_pct,"));

        let back = import_ingredients(&text, &[]).unwrap();
        assert_eq!(back.len(), mix.len());
        for (a, b) in mix.iter().zip(&back) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.description, b.description);
            assert_eq!(a.category, b.category);
            assert_eq!(a.inclusion_pct, b.inclusion_pct);
            assert_eq!(a.price_usd_per_ton, b.price_usd_per_ton);
            assert_eq!(a.nutrients, b.nutrients);
        }
    }
}
