use beacon_privacy::PiiRedactor;
use proptest::prelude::*;

proptest! {
    #[test]
    fn redaction_is_idempotent(text in ".{0,200}") {
        let redactor = PiiRedactor::default();
        let once = redactor.redact(&text);
        let twice = redactor.redact(&once);
        prop_assert_eq!(&once, &twice, "not idempotent on {:?}", text);
    }

    #[test]
    fn redacted_ssn_never_survives(
        a in 100u32..999, b in 10u32..99, c in 1000u32..9999,
        prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}",
    ) {
        let ssn = format!("{a:03}-{b:02}-{c:04}");
        let text = format!("{prefix} {ssn} {suffix}");
        let out = PiiRedactor::default().redact(&text);
        prop_assert!(!out.contains(&ssn));
        prop_assert!(out.contains("[SSN REDACTED]"));
    }

    #[test]
    fn redaction_idempotent_with_email(user in "[a-z]{3,8}", domain in "[a-z]{3,8}") {
        let input = format!("contact: {user}@{domain}.com");
        let redactor = PiiRedactor::default();
        let first = redactor.redact(&input);
        prop_assert_eq!(&first, "contact: [EMAIL REDACTED]");
        prop_assert_eq!(redactor.redact(&first), first);
    }

    #[test]
    fn text_without_digits_or_at_signs_or_honorifics_is_untouched(text in "[a-z ,.]{0,200}") {
        prop_assert_eq!(PiiRedactor::default().redact(&text), text);
    }
}
