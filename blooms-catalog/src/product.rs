use std::fmt;
use std::str::FromStr;
use blooms_shared::Money;
use crate::catalog::{CatalogError, CatalogItem, CodeChoice};

/// Bouquet categories offered by the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Romantic,
    Birthday,
    GrandOpening,
    Condolence,
    Anniversary,
}

impl Category {
    /// Menu order.
    pub const ALL: [Category; 5] = [
        Category::Romantic,
        Category::Birthday,
        Category::GrandOpening,
        Category::Condolence,
        Category::Anniversary,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Romantic => "Romantic",
            Category::Birthday => "Birthday",
            Category::GrandOpening => "Grand Opening",
            Category::Condolence => "Condolence",
            Category::Anniversary => "Anniversary",
        }
    }

    /// Prefix for auto-generated product codes
    pub fn code_prefix(&self) -> &'static str {
        match self {
            Category::Romantic => "R",
            Category::Birthday => "B",
            Category::GrandOpening => "GO",
            Category::Condolence => "C",
            Category::Anniversary => "A",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| CatalogError::InvalidCategory(s.to_string()))
    }
}

/// Whether an item can currently be ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Availability {
    #[default]
    Available,
    Unavailable,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Unavailable => "Unavailable",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Availability {
    type Err = CatalogError;

    /// Status text must match exactly, as typed by the operator or stored on disk.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Availability::Available),
            "Unavailable" => Ok(Availability::Unavailable),
            other => Err(CatalogError::InvalidStatus(other.to_string())),
        }
    }
}

/// A bouquet in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub code: String,
    pub name: String,
    pub category: Category,
    pub price: Money,
    pub status: Availability,
    /// Running average of customer ratings; not persisted.
    pub rating: f64,
    pub rating_count: u32,
}

impl Product {
    pub fn new(code: impl Into<String>, name: impl Into<String>, category: Category, price: Money) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category,
            price,
            status: Availability::Available,
            rating: 0.0,
            rating_count: 0,
        }
    }

    pub fn with_status(mut self, status: Availability) -> Self {
        self.status = status;
        self
    }

    /// Fold a 1-5 rating into the running average.
    pub fn add_rating(&mut self, rating: f64) -> Result<(), CatalogError> {
        if !(1.0..=5.0).contains(&rating) {
            return Err(CatalogError::InvalidRating(rating));
        }

        let total = self.rating * f64::from(self.rating_count);
        self.rating_count += 1;
        self.rating = (total + rating) / f64::from(self.rating_count);
        Ok(())
    }
}

impl CatalogItem for Product {
    fn code(&self) -> &str { &self.code }
    fn name(&self) -> &str { &self.name }
    fn price(&self) -> Money { self.price }
    fn status(&self) -> Availability { self.status }
    fn set_price(&mut self, price: Money) { self.price = price; }
    fn set_status(&mut self, status: Availability) { self.status = status; }
}

impl fmt::Display for Product {
    /// One row of the product listing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:<25} {:<15} ${:<8} {}",
            self.code,
            self.name,
            self.category.label(),
            self.price.to_string(),
            self.status
        )?;
        if self.rating_count > 0 {
            write!(f, " rated {:.1}/5 ({} reviews)", self.rating, self.rating_count)?;
        }
        Ok(())
    }
}

/// Operator input for a new bouquet
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub price: Money,
    pub code: CodeChoice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert_eq!(Category::GrandOpening.code_prefix(), "GO");
        assert!(matches!("romantic".parse::<Category>(), Err(CatalogError::InvalidCategory(_))));
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert_eq!("Unavailable".parse::<Availability>().unwrap(), Availability::Unavailable);
        assert!(matches!("available".parse::<Availability>(), Err(CatalogError::InvalidStatus(_))));
    }

    #[test]
    fn test_running_average() {
        let mut product = Product::new("R001", "Red Roses", Category::Romantic, Money::from_dollars(50));
        product.add_rating(5.0).unwrap();
        product.add_rating(4.0).unwrap();
        product.add_rating(3.0).unwrap();

        assert_eq!(product.rating_count, 3);
        assert!((product.rating - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let mut product = Product::new("B001", "Sunflowers", Category::Birthday, Money::from_dollars(40));
        assert!(product.add_rating(0.5).is_err());
        assert!(product.add_rating(5.5).is_err());
        assert_eq!(product.rating_count, 0);
    }

    #[test]
    fn test_listing_row_shows_rating_only_when_rated() {
        let mut product = Product::new("R001", "Red Roses", Category::Romantic, Money::from_dollars(50));
        assert!(!product.to_string().contains("rated"));

        product.add_rating(4.5).unwrap();
        let row = product.to_string();
        assert!(row.starts_with("R001"));
        assert!(row.contains("$50.00"));
        assert!(row.ends_with("rated 4.5/5 (1 reviews)"));
    }
}
