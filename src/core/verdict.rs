use crate::domain::model::{BioStatus, SecurityVerdict, Verdict, TWO_FACTOR_ADVISORY};

/// Secure only when the email is in no known breach and the bio is clean.
pub fn evaluate(breach_count: u32, suspicious: bool) -> Verdict {
    let bio_status = if suspicious {
        BioStatus::SuspiciousLinkFound
    } else {
        BioStatus::Clean
    };

    let security_verdict = if breach_count == 0 && bio_status == BioStatus::Clean {
        SecurityVerdict::Secure
    } else {
        SecurityVerdict::NotSecure
    };

    Verdict {
        bio_status,
        security_verdict,
        advisory: TWO_FACTOR_ADVISORY,
    }
}
