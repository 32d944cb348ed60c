//! Enums shared across several API resources

use crate::wire::wire_enum;

wire_enum! {
    /// ISO 4217 currency code for an amount of money
    ///
    /// Amounts themselves are carried as integers in the currency's minor
    /// unit (e.g. cents for USD).
    pub enum Currency {
        /// Canadian Dollar
        Cad => "CAD",
        /// Swiss Franc
        Chf => "CHF",
        /// Euro
        Eur => "EUR",
        /// British Pound
        Gbp => "GBP",
        /// Japanese Yen
        Jpy => "JPY",
        /// US Dollar
        Usd => "USD",
    }
}

wire_enum! {
    /// The kind of route a transaction came in over
    pub enum RouteType {
        /// An account number the funds moved over
        AccountNumber => "account_number",
        /// A card the funds moved on
        Card => "card",
    }
}

wire_enum! {
    /// The card network a payment was processed on
    pub enum CardNetwork {
        Visa => "visa",
    }
}
