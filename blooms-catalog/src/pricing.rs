use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use blooms_shared::Money;

/// Delivery fee schedule
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Flat fee for any delivery
    pub delivery_base_fee: Money,

    /// Added when the delivery date is a Saturday or Sunday
    pub weekend_surcharge: Money,

    /// Added for same-day delivery
    pub same_day_fee: Money,

    /// `chrono` format of operator-entered delivery dates
    pub date_format: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            delivery_base_fee: Money::from_dollars(35),
            weekend_surcharge: Money::from_dollars(10),
            same_day_fee: Money::from_dollars(35),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// Delivery details needed for pricing. The date is kept as typed.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryRequest<'a> {
    pub date: &'a str,
    pub same_day: bool,
}

/// Delivery part of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryCharge {
    /// Base fee plus weekend surcharge, if any
    pub fee: Money,
    pub weekend_surcharge: Option<Money>,
    pub same_day_fee: Option<Money>,
}

impl DeliveryCharge {
    pub fn total(&self) -> Money {
        self.fee + self.same_day_fee.unwrap_or(Money::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Product plus add-on
    pub items: Money,
    /// `None` for store pickup
    pub delivery: Option<DeliveryCharge>,
    pub total: Money,
}

/// Order total calculator
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Parse a delivery date in the configured format.
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), &self.config.date_format).ok()
    }

    /// Unparseable or empty dates count as weekdays.
    pub fn is_weekend_delivery(&self, raw: &str) -> bool {
        self.parse_date(raw)
            .map(|date| matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .unwrap_or(false)
    }

    pub fn delivery_charge(&self, request: DeliveryRequest<'_>) -> DeliveryCharge {
        let weekend_surcharge = self
            .is_weekend_delivery(request.date)
            .then_some(self.config.weekend_surcharge);
        let same_day_fee = request.same_day.then_some(self.config.same_day_fee);

        DeliveryCharge {
            fee: self.config.delivery_base_fee + weekend_surcharge.unwrap_or(Money::ZERO),
            weekend_surcharge,
            same_day_fee,
        }
    }

    /// Price a set of items with optional delivery.
    pub fn quote(
        &self,
        item_prices: impl IntoIterator<Item = Money>,
        delivery: Option<DeliveryRequest<'_>>,
    ) -> PriceBreakdown {
        let items: Money = item_prices.into_iter().sum();
        let delivery = delivery.map(|request| self.delivery_charge(request));
        let total = items + delivery.map(|charge| charge.total()).unwrap_or(Money::ZERO);

        PriceBreakdown { items, delivery, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 12/03/2025 is a Wednesday, 15/03/2025 a Saturday.
    const WEEKDAY: &str = "12/03/2025";
    const SATURDAY: &str = "15/03/2025";

    fn engine() -> PricingEngine {
        PricingEngine::new(PricingConfig::default())
    }

    fn delivery(date: &str, same_day: bool) -> Option<DeliveryRequest<'_>> {
        Some(DeliveryRequest { date, same_day })
    }

    #[test]
    fn test_reference_totals() {
        let engine = engine();
        let product = Money::from_dollars(50);

        assert_eq!(engine.quote([product], delivery(WEEKDAY, false)).total, Money::from_dollars(85));
        assert_eq!(engine.quote([product], delivery(WEEKDAY, true)).total, Money::from_dollars(120));
        assert_eq!(engine.quote([product], delivery(SATURDAY, true)).total, Money::from_dollars(130));
    }

    #[test]
    fn test_weekend_surcharge() {
        let engine = engine();
        let weekday = engine.delivery_charge(DeliveryRequest { date: WEEKDAY, same_day: false });
        let sunday = engine.delivery_charge(DeliveryRequest { date: "16/03/2025", same_day: false });

        assert_eq!(weekday.weekend_surcharge, None);
        assert_eq!(sunday.weekend_surcharge, Some(Money::from_dollars(10)));
        assert_eq!(sunday.fee, Money::from_dollars(45));
        assert_eq!(sunday.total(), Money::from_dollars(45));
    }

    #[test]
    fn test_unparseable_date_is_a_weekday() {
        let engine = engine();
        assert!(!engine.is_weekend_delivery("next saturday"));
        assert!(!engine.is_weekend_delivery(""));
        assert!(!engine.is_weekend_delivery("2025-03-15"));
        assert_eq!(engine.quote([Money::from_dollars(50)], delivery("soon", false)).total, Money::from_dollars(85));
    }

    #[test]
    fn test_largest_accepted_price_is_quoted() {
        let price = Money::parse("1000000000000").unwrap();
        let quote = engine().quote([price, price], delivery(SATURDAY, true));
        assert_eq!(quote.total, Money::parse("2000000000080").unwrap());
    }

    #[test]
    fn test_pickup_has_no_delivery_charge() {
        let breakdown = engine().quote([Money::from_dollars(50), Money::from_dollars(8)], None);
        assert_eq!(breakdown.items, Money::from_dollars(58));
        assert_eq!(breakdown.delivery, None);
        assert_eq!(breakdown.total, Money::from_dollars(58));
    }

    #[test]
    fn test_custom_fees() {
        let engine = PricingEngine::new(PricingConfig {
            delivery_base_fee: Money::from_dollars(20),
            weekend_surcharge: Money::from_dollars(5),
            same_day_fee: Money::from_dollars(15),
            date_format: "%Y-%m-%d".to_string(),
        });
        let quote = engine.quote([Money::from_dollars(50)], delivery("2025-03-15", true));
        assert_eq!(quote.total, Money::from_dollars(90));
    }
}
