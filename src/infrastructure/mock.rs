//! Seeded synthetic dataset shaped like the real export: messy headers,
//! PII columns, missing cells, and the occasional inverted date pair.
//! Deterministic for a given seed, so tests can assert exact outcomes.

use crate::domain::table::{Column, Table};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const REGIONS: &[&str] = &[
    "Central Africa",
    "Central America",
    "Oceania",
    "Southeast Asia",
    "Western Europe",
];
const CATEGORIES: &[&str] = &["Cleats", "Fishing", "Fitness", "Indoor/Outdoor Games", "Water Sports"];
const SEGMENTS: &[&str] = &["Consumer", "Corporate", "Home Office"];
const SHIPPING_MODES: &[&str] = &["First Class", "Same Day", "Second Class", "Standard Class"];

pub struct MockDataset {
    rows: usize,
    seed: u64,
    /// Fraction of rows whose cells are blanked out (missing values).
    missing_share: f64,
    /// Fraction of rows whose shipping date lands before the order date.
    inverted_date_share: f64,
}

impl MockDataset {
    pub fn new(rows: usize, seed: u64) -> Self {
        Self {
            rows,
            seed,
            missing_share: 0.05,
            inverted_date_share: 0.01,
        }
    }

    pub fn with_missing_share(mut self, share: f64) -> Self {
        self.missing_share = share;
        self
    }

    pub fn with_inverted_date_share(mut self, share: f64) -> Self {
        self.inverted_date_share = share;
        self
    }

    /// Generates a raw table with the export's original header spellings.
    pub fn generate(&self) -> Table {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let base_date = NaiveDate::from_ymd_opt(2017, 1, 1).expect("valid base date");

        let mut ids = Vec::with_capacity(self.rows);
        let mut order_dates = Vec::with_capacity(self.rows);
        let mut ship_dates = Vec::with_capacity(self.rows);
        let mut regions = Vec::with_capacity(self.rows);
        let mut categories = Vec::with_capacity(self.rows);
        let mut segments = Vec::with_capacity(self.rows);
        let mut modes = Vec::with_capacity(self.rows);
        let mut quantities = Vec::with_capacity(self.rows);
        let mut sales = Vec::with_capacity(self.rows);
        let mut profits = Vec::with_capacity(self.rows);
        let mut late_flags = Vec::with_capacity(self.rows);
        let mut real_days = Vec::with_capacity(self.rows);
        let mut emails = Vec::with_capacity(self.rows);
        let mut streets = Vec::with_capacity(self.rows);

        for index in 0..self.rows {
            let order_date = base_date + Days::new(rng.random_range(0..365));
            let scheduled: u64 = rng.random_range(0..7);
            let inverted = rng.random_bool(self.inverted_date_share);
            let shipping_date = if inverted {
                order_date - Days::new(rng.random_range(1..4))
            } else {
                order_date + Days::new(scheduled)
            };

            let quantity = rng.random_range(1..=5u32);
            let unit_price = rng.random_range(10.0..400.0f64);
            let sale = unit_price * quantity as f64;
            let profit = sale * rng.random_range(-0.2..0.4f64);
            let late = scheduled > 4 || rng.random_bool(0.2);

            ids.push(Some((10_000 + index).to_string()));
            order_dates.push(Some(format!("{} {:02}:{:02}", order_date.format("%m/%d/%Y"), rng.random_range(0..24), rng.random_range(0..60))));
            ship_dates.push(Some(format!("{} 00:00", shipping_date.format("%m/%d/%Y"))));
            regions.push(Some(pick(&mut rng, REGIONS)));
            categories.push(Some(pick(&mut rng, CATEGORIES)));
            segments.push(Some(pick(&mut rng, SEGMENTS)));
            modes.push(Some(pick(&mut rng, SHIPPING_MODES)));
            quantities.push(Some(quantity.to_string()));
            sales.push(Some(format!("{sale:.2}")));
            profits.push(Some(format!("{profit:.2}")));
            late_flags.push(Some(if late { "1" } else { "0" }.to_string()));
            real_days.push(Some(scheduled.to_string()));
            emails.push(Some("XXXXXXXXX".to_string()));
            streets.push(Some(format!("{} Elm Street", rng.random_range(1..9999))));
        }

        // Knock holes in the imputable columns only; ids and dates stay
        // intact so rows remain joinable.
        for cells in [&mut regions, &mut segments, &mut quantities, &mut sales, &mut modes] {
            for cell in cells.iter_mut() {
                if rng.random_bool(self.missing_share) {
                    *cell = None;
                }
            }
        }

        Table::new(vec![
            Column::new("Order Id", ids),
            Column::new("order date (DateOrders)", order_dates),
            Column::new("shipping date (DateOrders)", ship_dates),
            Column::new("Order Region", regions),
            Column::new("Category Name", categories),
            Column::new("Customer Segment", segments),
            Column::new("Shipping Mode", modes),
            Column::new("Order Item Quantity", quantities),
            Column::new("Sales", sales),
            Column::new("Order Profit Per Order", profits),
            Column::new("Late_delivery_risk", late_flags),
            Column::new("Days for shipping (real)", real_days),
            Column::new("Customer Email", emails),
            Column::new("Customer Street", streets),
        ])
    }
}

fn pick(rng: &mut StdRng, options: &[&str]) -> String {
    options[rng.random_range(0..options.len())].to_string()
}
