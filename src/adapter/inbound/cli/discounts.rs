//! Handler for the `discounts` command.

use tabled::Tabled;

use super::output;
use crate::app::AppContext;
use crate::domain::{DiscountedListing, StoreId};
use crate::error::Result;

#[derive(Tabled)]
struct DiscountRow {
    #[tabled(rename = "Listing")]
    listing: String,
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Discount")]
    discount: String,
}

impl From<&DiscountedListing> for DiscountRow {
    fn from(item: &DiscountedListing) -> Self {
        Self {
            listing: item.listing_id.to_string(),
            original: item.original_price.to_string(),
            price: item.price.to_string(),
            discount: format!("{}%", item.discount_percentage),
        }
    }
}

/// Print the store's discounted listings.
pub async fn execute(app: &AppContext, store_id: &str, json: bool) -> Result<()> {
    let id = StoreId::new(store_id);
    let discounts = app.discounts.get_store_discounts(&id).await?;

    if json {
        return output::json(&discounts);
    }

    output::header(&format!("Store {id}"));
    if discounts.is_empty() {
        println!("  No discounted listings");
        return Ok(());
    }
    output::table(discounts.iter().map(DiscountRow::from).collect());
    Ok(())
}
