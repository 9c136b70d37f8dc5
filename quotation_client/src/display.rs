//! Plain-text rendering of the quotation list.
use quotation_common::QuotationRecord;

use crate::sync::Origin;

const RULE: &str = "------------------------------------------------------------";

/// Prints the quotation list as cards, preceded by the source marker and
/// any diagnostic.
pub fn render(records: &[QuotationRecord], origin: Origin, diagnostic: Option<&str>) {
    println!();
    println!("{}", RULE);
    let source = match origin {
        Origin::Live => "live",
        Origin::Cached => "cached",
    };
    println!(" Bar Service Quotations ({})", source);
    if origin == Origin::Cached {
        println!(" Offline Mode - Using Cached Data");
    }
    if let Some(diagnostic) = diagnostic {
        println!(" ! {}", diagnostic);
    }
    println!("{}", RULE);

    if records.is_empty() {
        println!(" No quotations found");
        return;
    }
    for record in records {
        render_card(record);
    }
}

fn render_card(record: &QuotationRecord) {
    println!(" {} ({})", record.client_name, record.company_name);
    println!(
        "   Event:    {} {}-{}",
        record.event_date, record.start_time, record.end_time
    );
    println!("   Guests:   {}", record.number_of_guests);
    println!("   Services: {}", record.services_requested.join(", "));
    println!("   Email:    {}", record.email);
    println!("   Phone:    {}", record.phone);
    println!("   Address:  {}", record.address);
    if let Some(notes) = &record.notes {
        println!("   Notes:    {}", notes);
    }
    println!(
        "   Created {}  Updated {}",
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.updated_at.format("%Y-%m-%d %H:%M")
    );
    println!("{}", RULE);
}
