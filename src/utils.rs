use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// Dates as the statistics endpoint expects them, e.g. `11.04.2021`.
const API_DATE: &[FormatItem<'static>] = format_description!("[day].[month].[year]");
/// Call timestamps as the API reports them, e.g. `2021-04-12T10:15:00.000Z`.
const CALL_DATE: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

pub fn format_api_date(date: Date) -> String {
    // The description only holds numeric components, so formatting cannot fail.
    date.format(API_DATE).unwrap_or_default()
}

pub fn parse_api_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, API_DATE)
}

pub fn parse_call_date(value: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(value, CALL_DATE)
}

/// Join the base URL and an endpoint name with a single slash.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{endpoint}", base_url.trim_end_matches('/'))
}

/// Endpoint params followed by the account credentials, in query string order.
pub fn with_credentials<'a>(
    params: &'a [(&'a str, String)],
    login: &'a str,
    token: &'a str,
) -> Vec<(&'a str, &'a str)> {
    let mut pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
    pairs.push(("user_email", login));
    pairs.push(("user_token", token));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn api_dates_are_day_first() {
        assert_eq!(format_api_date(date!(2021 - 04 - 11)), "11.04.2021");
        assert_eq!(format_api_date(date!(2021 - 12 - 01)), "01.12.2021");
        assert_eq!(parse_api_date("16.04.2021").unwrap(), date!(2021 - 04 - 16));
    }

    #[test]
    fn call_dates_parse_with_millis() {
        assert_eq!(
            parse_call_date("2021-04-12T10:15:07.000Z").unwrap(),
            datetime!(2021-04-12 10:15:07)
        );
        assert!(parse_call_date("12.04.2021 10:15").is_err());
        assert!(parse_call_date("").is_err());
    }

    #[test]
    fn endpoint_url_has_one_separator() {
        assert_eq!(
            endpoint_url("https://api.callibri.ru", "get_sites"),
            "https://api.callibri.ru/get_sites"
        );
        assert_eq!(
            endpoint_url("https://api.callibri.ru/", "get_sites"),
            "https://api.callibri.ru/get_sites"
        );
    }

    #[test]
    fn credentials_follow_endpoint_params() {
        let params = [
            ("site_id", "42".to_string()),
            ("date1", "11.04.2021".to_string()),
        ];
        assert_eq!(
            with_credentials(&params, "user@example.com", "t0ken"),
            vec![
                ("site_id", "42"),
                ("date1", "11.04.2021"),
                ("user_email", "user@example.com"),
                ("user_token", "t0ken"),
            ]
        );
        assert_eq!(
            with_credentials(&[], "a", "b"),
            vec![("user_email", "a"), ("user_token", "b")]
        );
    }
}
