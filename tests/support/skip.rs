/// Skip a test unless AWS credentials and a test KMS key are configured.
#[macro_export]
macro_rules! skip_without_aws {
    () => {
        if std::env::var("AWS_ACCESS_KEY_ID").is_err() && std::env::var("AWS_PROFILE").is_err() {
            eprintln!("SKIPPED: no AWS credentials (AWS_ACCESS_KEY_ID or AWS_PROFILE)");
            return;
        }
        if std::env::var("DRAGOMAN_TEST_KMS_KEY").is_err() {
            eprintln!("SKIPPED: DRAGOMAN_TEST_KMS_KEY not set (set to an AWS KMS key ARN or alias)");
            return;
        }
    };
}
