#[cfg(test)]
mod tests {
    use crate::logic::validate_registration;
    use devstats_common::{DeviceRegistrationPayload, DeviceType, ValidationIssue};

    fn payload(user_key: Option<&str>, device_type: Option<&str>) -> DeviceRegistrationPayload {
        DeviceRegistrationPayload {
            user_key: user_key.map(str::to_string),
            device_type: device_type.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_payload_is_trimmed() {
        let device = validate_registration(&payload(Some("  user-42 "), Some("Android"))).unwrap();
        assert_eq!(device.user_key, "user-42");
        assert_eq!(device.device_type, DeviceType::Android);
    }

    #[test]
    fn test_every_device_type_is_accepted() {
        for device_type in DeviceType::ALL {
            let result = validate_registration(&payload(Some("u"), Some(device_type.as_str())));
            assert_eq!(result.unwrap().device_type, device_type);
        }
    }

    #[test]
    fn test_whitespace_user_key_is_rejected() {
        let issues = validate_registration(&payload(Some(" \t "), Some("iOS"))).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::MissingUserKey]);
    }

    #[test]
    fn test_device_type_is_case_sensitive() {
        let issues = validate_registration(&payload(Some("u"), Some("ios"))).unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::InvalidDeviceType("ios".to_string())]
        );
    }

    #[test]
    fn test_all_issues_are_collected() {
        let issues = validate_registration(&payload(None, None)).unwrap_err();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingUserKey,
                ValidationIssue::MissingDeviceType
            ]
        );
    }

    #[test]
    fn test_empty_device_type_counts_as_missing() {
        let issues = validate_registration(&payload(Some("u"), Some(""))).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::MissingDeviceType]);
    }
}
