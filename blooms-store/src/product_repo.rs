use std::path::PathBuf;
use blooms_catalog::{Availability, Product};
use blooms_shared::Money;
use crate::flat_file::{FlatFile, LineDecoder, LineEncoder};

/// `code,name,category,price,status`; a line without status is Available.
/// Ratings are not stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCodec;

pub type ProductFile = FlatFile<ProductCodec>;

impl ProductFile {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        FlatFile::new(path, ProductCodec)
    }
}

impl LineEncoder for ProductCodec {
    type Record = Product;

    fn encode(&self, product: &Product) -> String {
        format!(
            "{},{},{},{},{}",
            product.code, product.name, product.category, product.price, product.status
        )
    }
}

impl LineDecoder for ProductCodec {
    fn decode(&self, line: &str) -> Option<Product> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (code, name, category, price, status) = match fields.as_slice() {
            [code, name, category, price] => (*code, *name, *category, *price, None),
            [code, name, category, price, status] => (*code, *name, *category, *price, Some(*status)),
            _ => return None,
        };

        if code.is_empty() || name.is_empty() {
            return None;
        }
        let category = category.parse().ok()?;
        let price = Money::parse(price).ok().filter(Money::is_positive)?;
        let status = match status {
            Some(status) => status.parse().ok()?,
            None => Availability::Available,
        };

        Some(Product::new(code, name, category, price).with_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blooms_catalog::Category;
    use blooms_core::{RecordSink, RecordSource};
    use std::fs;

    #[test]
    fn test_save_then_load_keeps_everything_but_ratings() {
        let dir = tempfile::tempdir().unwrap();
        let file = ProductFile::open(dir.path().join("Products.txt"));

        let mut roses = Product::new("R001", "Red Roses", Category::Romantic, Money::parse("49.90").unwrap());
        roses.add_rating(4.0).unwrap();
        let opening = Product::new("GO001", "Grand Stand", Category::GrandOpening, Money::from_dollars(120))
            .with_status(Availability::Unavailable);

        file.save(&[&roses, &opening]).unwrap();
        let report = file.load().unwrap();
        assert_eq!(report.skipped, 0);

        let loaded = &report.records;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].code, "R001");
        assert_eq!(loaded[0].name, "Red Roses");
        assert_eq!(loaded[0].category, Category::Romantic);
        assert_eq!(loaded[0].price, roses.price);
        assert_eq!(loaded[0].rating_count, 0);
        assert_eq!(loaded[1], opening);
    }

    #[test]
    fn test_line_format() {
        let product = Product::new("A001", "Golden Years", Category::Anniversary, Money::from_dollars(80));
        assert_eq!(ProductCodec.encode(&product), "A001,Golden Years,Anniversary,80.00,Available");
    }

    #[test]
    fn test_legacy_and_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Products.txt");
        fs::write(
            &path,
            "R001,Red Roses,Romantic,50.0\n\
             B001,Sunflowers,Birthday,35.5,Unavailable\n\
             X001,Mystery,Gardening,10,Available\n\
             C001,Lilies,Condolence,free,Available\n\
             C002,Lilies,Condolence,-4,Available\n\
             A001,Too,Many,Anniversary,10,Available\n\
             R002,Tulips,Romantic,20,Maybe\n",
        )
        .unwrap();

        let report = ProductFile::open(&path).load().unwrap();
        assert_eq!(report.skipped, 5);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].status, Availability::Available);
        assert_eq!(report.records[0].price, Money::from_dollars(50));
        assert_eq!(report.records[1].status, Availability::Unavailable);
    }
}
