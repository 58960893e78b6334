//! Month-bucketed sales trend.
//!
//! Buckets are calendar months in the time zone of the `now` reference, so
//! passing `Local::now()` gives local month boundaries and `Utc::now()` gives
//! UTC ones.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::calculations::{realized_margin, realized_revenue};
use crate::config::MAX_MONTHS;
use crate::types::{MonthlySales, Product};
use crate::util::{month_label, shift_month};

/// Build `months` buckets ending with the month containing `now`, oldest first.
///
/// A sale lands in the bucket whose calendar month contains its `soldDate`.
/// Unsold products and sales without a date are skipped. Sales outside the
/// window are ignored. `months` is capped at `MAX_MONTHS`.
pub fn monthly_sales<Tz: TimeZone>(
    products: &[Product],
    now: &DateTime<Tz>,
    months: u32,
) -> Vec<MonthlySales> {
    let mut buckets: Vec<MonthlySales> = (0..months.min(MAX_MONTHS))
        .rev()
        .map(|back| {
            let (year, month) = shift_month(now.year(), now.month(), back);
            MonthlySales {
                label: month_label(year, month),
                year,
                month,
                sales: 0.0,
                profit: 0.0,
            }
        })
        .collect();

    let tz = now.timezone();
    for product in products {
        let Some(sold_at) = product
            .sold_date()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|utc| utc.with_timezone(&tz))
        else {
            continue;
        };

        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| b.year == sold_at.year() && b.month == sold_at.month())
        {
            bucket.sales += realized_revenue(product);
            bucket.profit += realized_margin(product);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleStatus;
    use chrono::FixedOffset;

    fn ms(y: i32, m: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .unwrap()
            .timestamp_millis()
    }

    fn sold(original: f64, price: Option<f64>, date: Option<i64>) -> Product {
        Product {
            id: "p".into(),
            name: "p".into(),
            quantity: 1,
            original_price: original,
            category: "Other".into(),
            sale: SaleStatus::Sold { price, date },
            buyer_info: None,
            low_stock_threshold: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn six_empty_buckets_oldest_first() {
        let now = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
        let buckets = monthly_sales(&[], &now, 6);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Oct 2025", "Nov 2025", "Dec 2025", "Jan 2026", "Feb 2026", "Mar 2026"]
        );
        assert!(buckets.iter().all(|b| b.sales == 0.0 && b.profit == 0.0));
    }

    #[test]
    fn sales_land_in_their_month() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let products = vec![
            sold(50.0, Some(80.0), Some(ms(2026, 10, 1, 0))),
            sold(20.0, Some(15.0), Some(ms(2026, 10, 17, 8))),
            sold(10.0, Some(30.0), Some(ms(2026, 5, 31, 23))),
        ];
        let buckets = monthly_sales(&products, &now, 6);

        let oct = buckets.last().unwrap();
        assert_eq!(oct.label, "Oct 2026");
        assert!((oct.sales - 95.0).abs() < 1e-9);
        assert!((oct.profit - 25.0).abs() < 1e-9);

        let may = &buckets[0];
        assert_eq!(may.label, "May 2026");
        assert!((may.sales - 30.0).abs() < 1e-9);
        assert!((may.profit - 20.0).abs() < 1e-9);
    }

    #[test]
    fn sales_outside_window_or_undated_are_excluded() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let products = vec![
            sold(10.0, Some(100.0), Some(ms(2026, 4, 30, 12))),
            sold(10.0, Some(100.0), None),
            sold(10.0, Some(100.0), Some(ms(2026, 11, 1, 0))),
        ];
        let buckets = monthly_sales(&products, &now, 6);
        assert!(buckets.iter().all(|b| b.sales == 0.0 && b.profit == 0.0));
    }

    #[test]
    fn month_boundary_follows_reference_time_zone() {
        // 2026-09-30 23:30 UTC is already October at UTC+02:00.
        let sale = sold(0.0, Some(10.0), Some(ms(2026, 9, 30, 23) + 30 * 60 * 1000));
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();

        let buckets = monthly_sales(std::slice::from_ref(&sale), &now, 2);
        assert_eq!(buckets[0].label, "Sep 2026");
        assert_eq!(buckets[0].sales, 0.0);
        assert_eq!(buckets[1].label, "Oct 2026");
        assert!((buckets[1].sales - 10.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_window_is_capped() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let buckets = monthly_sales(&[], &now, u32::MAX);
        assert_eq!(buckets.len(), MAX_MONTHS as usize);
        assert_eq!(buckets[0].label, "Nov 2016");
        assert_eq!(buckets.last().unwrap().label, "Oct 2026");
    }
}
