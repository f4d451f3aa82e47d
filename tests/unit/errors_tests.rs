/*!
 * Tests for error types and conversions
 */

use subsentence::errors::{
    AppError, DocumentError, ProviderError, SubtitleError, TranslationError, TranslationWarning,
};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 500,
        message: "Internal error".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("500"));
    assert!(display.contains("Internal error"));
}

#[test]
fn test_providerError_quotaExhausted_shouldDisplayCorrectly() {
    let error = ProviderError::QuotaExhausted("456".to_string());
    assert!(error.to_string().contains("Quota exhausted"));
}

#[test]
fn test_translationError_fromProviderError_shouldWrapCorrectly() {
    let error: TranslationError = ProviderError::RequestFailed("Test error".to_string()).into();
    match error {
        TranslationError::Provider(ProviderError::RequestFailed(msg)) => assert_eq!(msg, "Test error"),
        other => panic!("Expected Provider error, got {:?}", other),
    }
}

#[test]
fn test_translationError_fromMalformedDocument_shouldBecomeResponseParse() {
    let provider_error = ProviderError::MalformedDocument(DocumentError::new("missing root"));
    let error: TranslationError = provider_error.into();
    assert!(matches!(error, TranslationError::ResponseParse(ref e) if e.reason == "missing root"));
}

#[test]
fn test_translationError_fromSubtitleError_shouldKeepCategory() {
    let empty: TranslationError = SubtitleError::EmptySource.into();
    assert!(matches!(empty, TranslationError::EmptySource));

    let malformed: TranslationError = SubtitleError::MalformedSource {
        line: 4,
        reason: "bad timing".to_string(),
    }
    .into();
    match malformed {
        TranslationError::MalformedSource(msg) => {
            assert!(msg.contains("line 4"));
            assert!(msg.contains("bad timing"));
        }
        other => panic!("Expected MalformedSource, got {:?}", other),
    }
}

#[test]
fn test_translationError_quotaExceeded_shouldShowUsage() {
    let error = TranslationError::QuotaExceeded { used: 500, limit: 500 };
    assert_eq!(error.to_string(), "Translation quota exceeded: 500/500 characters used");
}

#[test]
fn test_translationWarning_shouldDisplayIndex() {
    let warning = TranslationWarning::MissingTranslationFor(12);
    assert_eq!(warning.to_string(), "No translated text found for subtitle starting at index 12");
}

#[test]
fn test_appError_fromTranslationError_shouldWrap() {
    let error: AppError = TranslationError::EmptySource.into();
    assert!(error.to_string().starts_with("Translation error"));

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(io, AppError::File(_)));
}
