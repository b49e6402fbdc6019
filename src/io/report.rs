//! Sales report output
//!
//! Writes the session's completed sales as CSV with columns:
//! `drink,price,method,tendered,change`. Rows appear in purchase order.

use crate::core::machine::SaleRecord;
use crate::types::VendError;
use std::io::Write;

/// Write sale records as CSV to the given writer
///
/// # Errors
///
/// Returns `Io` if serialization or the underlying writer fails.
pub fn write_sales_csv(sales: &[SaleRecord], output: &mut dyn Write) -> Result<(), VendError> {
    let mut writer = csv::Writer::from_writer(output);

    for sale in sales {
        writer.serialize(sale)?;
    }

    writer.flush()?;
    Ok(())
}
