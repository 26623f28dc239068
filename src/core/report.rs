use crate::domain::model::{AnalysisRecord, AnalysisResult};

pub const REPORT_SUBJECT: &str = "Social Media Security Analyzer Report";

/// Plain-text report sent to the submitter.
pub fn render_report(record: &AnalysisRecord, result: &AnalysisResult) -> String {
    let mut body = String::new();

    body.push_str("Hey there,\n\n");
    body.push_str(
        "Thank you for trusting our Social Media Security Analyzer. \
         Here's your personalized security report:\n\n",
    );
    body.push_str("________________________________________\n\n");
    body.push_str(&format!("Email: {}\n", record.email));
    body.push_str(&format!(
        "Found in: {} public data breach(es).\n\n",
        result.breach_count()
    ));
    body.push_str(&format!("Instagram Username: @{}\n", result.handle()));
    body.push_str(&format!(
        "Bio Scan Result: {}\n",
        result.bio_status().description()
    ));
    body.push_str(&format!("2FA Recommendation: {}\n", result.advisory()));
    body.push_str(&format!(
        "Account Secure: {}\n",
        result.security_verdict().as_yes_no()
    ));

    if result.is_degraded() {
        body.push_str(
            "\nNote: part of this check could not be completed \
             (profile or breach data unavailable). Treat this verdict with caution.\n",
        );
    }

    body.push_str("________________________________________\n\n");
    body.push_str(
        "We highly recommend updating any old passwords and avoiding \
         suspicious links in your profile bio.\n",
    );
    body.push_str("Your online safety is important to us.\n\n");
    body.push_str("Social Media Security Analyzer Team\n");

    body
}

/// Headers and body as an RFC 5322 style message.
pub fn render_message(from: &str, record: &AnalysisRecord, result: &AnalysisResult) -> String {
    format!(
        "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}",
        from,
        record.email,
        REPORT_SUBJECT,
        record.created_at.to_rfc2822(),
        render_report(record, result)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verdict::evaluate;
    use crate::domain::model::Handle;
    use chrono::{TimeZone, Utc};

    fn sample(suspicious: bool, degraded: bool) -> (AnalysisRecord, AnalysisResult) {
        let result = AnalysisResult::new(
            Handle::new("alice"),
            0,
            evaluate(0, suspicious),
            vec![],
            degraded,
        );
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = AnalysisRecord::from_result(
            1,
            "alice@example.com",
            "https://instagram.com/alice",
            &result,
            created_at,
        );
        (record, result)
    }

    #[test]
    fn test_report_contains_verdict_lines() {
        let (record, result) = sample(true, false);
        let report = render_report(&record, &result);

        assert!(report.contains("Email: alice@example.com"));
        assert!(report.contains("Found in: 0 public data breach(es)."));
        assert!(report.contains("Instagram Username: @alice"));
        assert!(report.contains("Bio Scan Result: Suspicious link found!"));
        assert!(report.contains("Account Secure: No"));
        assert!(!report.contains("Treat this verdict with caution"));
    }

    #[test]
    fn test_degraded_report_carries_warning() {
        let (record, result) = sample(false, true);
        let report = render_report(&record, &result);

        assert!(report.contains("Account Secure: Yes"));
        assert!(report.contains("Treat this verdict with caution"));
    }

    #[test]
    fn test_message_headers() {
        let (record, result) = sample(false, false);
        let message = render_message("team@analyzer.example", &record, &result);

        assert!(message.starts_with("From: team@analyzer.example\r\nTo: alice@example.com\r\n"));
        assert!(message.contains(&format!("Subject: {}\r\n", REPORT_SUBJECT)));
        assert!(message.contains("\r\n\r\nHey there,"));
    }
}
