#[cfg(test)]
mod tests {
    use crate::logic::{
        build_statistics, validate_auth_log, validate_statistics_query, DeviceStatistics,
    };
    use devstats_common::{DeviceRegistrationPayload, DeviceType, ValidationIssue};
    use devstats_db::DeviceTypeCount;

    fn payload(user_key: Option<&str>, device_type: Option<&str>) -> DeviceRegistrationPayload {
        DeviceRegistrationPayload {
            user_key: user_key.map(str::to_string),
            device_type: device_type.map(str::to_string),
        }
    }

    fn count(device_type: &str, count: i64) -> DeviceTypeCount {
        DeviceTypeCount {
            device_type: device_type.to_string(),
            count,
        }
    }

    #[test]
    fn test_auth_log_payload_is_trimmed() {
        let device = validate_auth_log(&payload(Some(" key "), Some("Watch"))).unwrap();
        assert_eq!(device.user_key, "key");
        assert_eq!(device.device_type, DeviceType::Watch);
    }

    #[test]
    fn test_auth_log_rejects_bad_input() {
        assert_eq!(
            validate_auth_log(&payload(Some(""), Some("TV"))).unwrap_err(),
            vec![ValidationIssue::MissingUserKey]
        );
        assert_eq!(
            validate_auth_log(&payload(Some("k"), Some("tv"))).unwrap_err(),
            vec![ValidationIssue::InvalidDeviceType("tv".to_string())]
        );
        assert_eq!(
            validate_auth_log(&payload(None, Some("Xbox"))).unwrap_err(),
            vec![
                ValidationIssue::MissingUserKey,
                ValidationIssue::InvalidDeviceType("Xbox".to_string())
            ]
        );
    }

    #[test]
    fn test_statistics_query_validation() {
        assert_eq!(validate_statistics_query(Some("iOS")), Ok(DeviceType::Ios));
        assert_eq!(
            validate_statistics_query(None),
            Err(ValidationIssue::MissingDeviceType)
        );
        assert_eq!(
            validate_statistics_query(Some("")),
            Err(ValidationIssue::MissingDeviceType)
        );
        assert_eq!(
            validate_statistics_query(Some("Xbox")),
            Err(ValidationIssue::InvalidDeviceType("Xbox".to_string()))
        );
    }

    #[test]
    fn test_empty_store_yields_zeroes() {
        let snapshot = build_statistics(&[]);
        assert_eq!(snapshot.statistics, DeviceStatistics::default());
        assert_eq!(snapshot.total, 0);
    }

    #[test]
    fn test_known_counts_sum_to_total() {
        let snapshot = build_statistics(&[count("Android", 4), count("TV", 1), count("iOS", 2)]);
        assert_eq!(
            snapshot.statistics,
            DeviceStatistics {
                ios: 2,
                android: 4,
                watch: 0,
                tv: 1
            }
        );
        assert_eq!(snapshot.total, 7);
    }

    #[test]
    fn test_unknown_device_types_count_towards_total_only() {
        let snapshot = build_statistics(&[count("Xbox", 3), count("iOS", 1), count("ios", 2)]);
        assert_eq!(snapshot.statistics.ios, 1);
        assert_eq!(snapshot.statistics.displayed_sum(), 1);
        assert_eq!(snapshot.total, 6);
        assert!(snapshot.total > snapshot.statistics.displayed_sum());
    }

    #[test]
    fn test_statistics_serialize_with_device_type_names() {
        let json = serde_json::to_value(DeviceStatistics {
            ios: 1,
            android: 2,
            watch: 3,
            tv: 4,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"iOS": 1, "Android": 2, "Watch": 3, "TV": 4})
        );
    }
}
