//! Unit tests for error handling

use super::*;
use std::io;

mod scrape_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ScrapeError::from(json_error);

        match err {
            ScrapeError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err = ScrapeError::from(io_error);

        match err {
            ScrapeError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_invalid_header_error_conversion() {
        let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();
        let err = ScrapeError::from(header_error);

        match err {
            ScrapeError::InvalidHeader(_) => (),
            _ => panic!("Expected InvalidHeader error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "not-a-number".parse::<u32>().unwrap_err();
        let err = ScrapeError::from(parse_error);

        match err {
            ScrapeError::InvalidId(_) => (),
            _ => panic!("Expected InvalidId error variant"),
        }
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let err = ScrapeError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, ScrapeError::Sqlite(_)));
    }

    #[test]
    fn test_anyhow_error_becomes_storage_error() {
        let err = ScrapeError::from(anyhow::anyhow!("disk full").context("writing batch"));

        match err {
            ScrapeError::Storage { message } => {
                assert!(message.contains("writing batch"));
                assert!(message.contains("disk full"));
            }
            _ => panic!("Expected Storage error variant"),
        }
    }

    #[test]
    fn test_missing_league_id_display() {
        let err = ScrapeError::MissingLeagueId {
            env_var: "ESPN_FLB_LEAGUE_ID".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "League ID not provided and ESPN_FLB_LEAGUE_ID environment variable not set"
        );
    }

    #[test]
    fn test_invalid_period_range_display() {
        let err = ScrapeError::InvalidPeriodRange { start: 9, end: 3 };
        assert_eq!(err.to_string(), "Invalid scoring period range: 9 to 3");
    }

    #[test]
    fn test_sink_rejected_display() {
        let err = ScrapeError::SinkRejected {
            sink: "supabase".to_string(),
            status: 409,
            body: "conflict".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "supabase rejected the write with status 409: conflict"
        );
    }

    #[test]
    fn test_error_debug_format() {
        let err = ScrapeError::NoTeams;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NoTeams"));
    }
}
