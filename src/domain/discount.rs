//! Listing discount math.
//!
//! The first discount captures the listing's price as `original_price`.
//! Later discounts are computed from that baseline, never from the already
//! discounted price, so discounts do not compound.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::error::DomainError;
use super::id::ListingId;
use super::listing::Listing;

/// A discount percentage in `1..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    /// Validate a raw percentage.
    ///
    /// # Errors
    /// [`DomainError::InvalidDiscount`] outside `1..=99`.
    pub fn try_new(percentage: i64) -> Result<Self, DomainError> {
        match u8::try_from(percentage) {
            Ok(pct @ 1..=99) => Ok(Self(pct)),
            _ => Err(DomainError::InvalidDiscount { percentage }),
        }
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A listing currently on discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountedListing {
    pub listing_id: ListingId,
    pub original_price: Decimal,
    pub price: Decimal,
    pub discount_percentage: u8,
}

/// `base - base * pct / 100`, rounded to a whole unit with halves rounded up.
#[must_use]
pub fn discounted_price(base: Decimal, pct: DiscountPercent) -> Decimal {
    let cut = base * Decimal::from(pct.value()) / Decimal::ONE_HUNDRED;
    (base - cut).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Put `listing` on a `pct` discount, returning the new price.
///
/// # Errors
/// [`DomainError::PriceByAgreement`] if the listing has no fixed price.
pub fn apply_listing_discount(
    listing: &mut Listing,
    pct: DiscountPercent,
) -> Result<Decimal, DomainError> {
    if listing.price_by_agreement {
        return Err(DomainError::PriceByAgreement {
            listing_id: listing.id.clone(),
        });
    }

    let base = listing.original_price.unwrap_or(listing.price);
    let price = discounted_price(base, pct);

    listing.original_price = Some(base);
    listing.price = price;
    listing.discount_percentage = Some(pct.value());
    listing.has_discount = true;

    Ok(price)
}

/// Restore the baseline price. Returns `false` if there was no discount.
pub fn remove_listing_discount(listing: &mut Listing) -> bool {
    if !listing.has_discount {
        return false;
    }
    if let Some(original) = listing.original_price.take() {
        listing.price = original;
    }
    listing.discount_percentage = None;
    listing.has_discount = false;
    true
}

/// Project a listing's discount, if it has a well-formed one.
#[must_use]
pub fn discount_of(listing: &Listing) -> Option<DiscountedListing> {
    if !listing.has_discount {
        return None;
    }
    Some(DiscountedListing {
        listing_id: listing.id.clone(),
        original_price: listing.original_price?,
        price: listing.price,
        discount_percentage: listing.discount_percentage?,
    })
}

/// Check the discount fields agree with each other.
#[must_use]
pub fn is_consistent(listing: &Listing) -> bool {
    let derived = match (listing.original_price, listing.discount_percentage) {
        (Some(original), Some(raw)) => DiscountPercent::try_new(i64::from(raw))
            .map(|pct| discounted_price(original, pct) == listing.price)
            .unwrap_or(false),
        _ => false,
    };
    listing.has_discount == derived
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::StoreId;
    use rust_decimal_macros::dec;

    fn listing(price: Decimal) -> Listing {
        Listing::new("l1", StoreId::new("s1"), price)
    }

    fn pct(value: i64) -> DiscountPercent {
        DiscountPercent::try_new(value).unwrap()
    }

    #[test]
    fn percent_bounds() {
        assert!(DiscountPercent::try_new(0).is_err());
        assert!(DiscountPercent::try_new(100).is_err());
        assert!(DiscountPercent::try_new(-5).is_err());
        assert!(DiscountPercent::try_new(1000).is_err());
        assert_eq!(pct(1).value(), 1);
        assert_eq!(pct(99).value(), 99);
    }

    #[test]
    fn first_discount_captures_baseline() {
        let mut listing = listing(dec!(100));

        let price = apply_listing_discount(&mut listing, pct(20)).unwrap();

        assert_eq!(price, dec!(80));
        assert_eq!(listing.original_price, Some(dec!(100)));
        assert_eq!(listing.discount_percentage, Some(20));
        assert!(listing.has_discount);
        assert!(is_consistent(&listing));
    }

    #[test]
    fn reapplying_uses_baseline_not_discounted_price() {
        let mut listing = listing(dec!(100));
        apply_listing_discount(&mut listing, pct(20)).unwrap();

        apply_listing_discount(&mut listing, pct(50)).unwrap();

        assert_eq!(listing.original_price, Some(dec!(100)));
        assert_eq!(listing.price, dec!(50));
    }

    #[test]
    fn price_is_rounded_to_whole_units() {
        assert_eq!(discounted_price(dec!(99), pct(15)), dec!(84));
        assert_eq!(discounted_price(dec!(10), pct(25)), dec!(8));
        assert_eq!(discounted_price(dec!(1999), pct(33)), dec!(1339));
    }

    #[test]
    fn price_by_agreement_is_rejected() {
        let mut listing = listing(dec!(100));
        listing.price_by_agreement = true;

        assert!(matches!(
            apply_listing_discount(&mut listing, pct(10)),
            Err(DomainError::PriceByAgreement { .. })
        ));
        assert!(!listing.has_discount);
        assert_eq!(listing.price, dec!(100));
    }

    #[test]
    fn removal_restores_baseline_for_every_percentage() {
        for raw in 1..=99 {
            let mut listing = listing(dec!(257));
            apply_listing_discount(&mut listing, pct(raw)).unwrap();

            assert!(remove_listing_discount(&mut listing));

            assert_eq!(listing.price, dec!(257));
            assert!(listing.original_price.is_none());
            assert!(listing.discount_percentage.is_none());
            assert!(!listing.has_discount);
            assert!(is_consistent(&listing));
        }
    }

    #[test]
    fn removal_without_discount_is_noop() {
        let mut listing = listing(dec!(40));
        assert!(!remove_listing_discount(&mut listing));
        assert_eq!(listing.price, dec!(40));
    }

    #[test]
    fn discount_projection() {
        let mut listing = listing(dec!(200));
        assert!(discount_of(&listing).is_none());

        apply_listing_discount(&mut listing, pct(10)).unwrap();

        assert_eq!(
            discount_of(&listing),
            Some(DiscountedListing {
                listing_id: ListingId::new("l1"),
                original_price: dec!(200),
                price: dec!(180),
                discount_percentage: 10,
            })
        );
    }
}
