use expense_core::currency::{
    format_amount, format_currency_value, format_day_label, format_month_label, CurrencyCode,
    CurrencyDisplay, FormatOptions, LocaleConfig, NegativeStyle,
};
use expense_core::ledger::MonthKey;
use chrono::NaiveDate;

#[test]
fn brazilian_real_matches_browser_output() {
    let locale = LocaleConfig::pt_br();
    let code = CurrencyCode::default();
    let options = FormatOptions::default();
    assert_eq!(
        format_currency_value(1234.5, &code, &locale, &options),
        "R$\u{a0}1.234,50"
    );
    assert_eq!(
        format_currency_value(0.0, &code, &locale, &options),
        "R$\u{a0}0,00"
    );
    assert_eq!(
        format_currency_value(-649.5, &code, &locale, &options),
        "-R$\u{a0}649,50"
    );
    assert_eq!(
        format_currency_value(1_000_000.0, &code, &locale, &options),
        "R$\u{a0}1.000.000,00"
    );
}

#[test]
fn alternative_presets_and_styles() {
    let locale = LocaleConfig::en_us();
    let options = FormatOptions {
        currency_display: CurrencyDisplay::Code,
        negative_style: NegativeStyle::Parentheses,
    };
    assert_eq!(
        format_currency_value(-1234.5, &CurrencyCode::new("usd"), &locale, &options),
        "(USD\u{a0}1,234.50)"
    );
    assert_eq!(
        format_currency_value(
            1234.5,
            &CurrencyCode::new("USD"),
            &locale,
            &FormatOptions::default()
        ),
        "$1,234.50"
    );
    assert_eq!(LocaleConfig::for_tag("en_US"), LocaleConfig::en_us());
    assert_eq!(LocaleConfig::for_tag("xx"), LocaleConfig::pt_br());
}

#[test]
fn plain_amounts_and_chart_labels() {
    assert_eq!(format_amount(&LocaleConfig::pt_br(), 350.5), "350,50");
    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(format_day_label(day), "05/01/2024");
    let month: MonthKey = "2024-01".parse().unwrap();
    assert_eq!(format_month_label(&month), "01/2024");
}
