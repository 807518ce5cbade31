//! Parsing of meeting invitation URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Domain every meeting URL points into.
static MEETING_DOMAIN: &str = "zoom.us";

/// Regular expression extracting the password from an invitation, either
/// from the `pwd` query parameter or from a `Passcode:` note next to the URL.
static PASSWORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:pwd=|pwd%3D|Passcode:\s?)([^\s&\)]+)").unwrap()
});

/// Extracts the meeting to join from the provided invitation `meeting_url`.
///
/// Returns the numeric meeting ID, or the vanity name of a personal meeting
/// room (`/my/<vanity>`), together with the password, if any.
///
/// `None` if the provided string is not a URL or points to no meeting.
#[must_use]
pub fn parse(meeting_url: &str) -> Option<(String, Option<String>)> {
    if Url::parse(meeting_url).is_err() {
        log::debug!("Not a URL: {}", meeting_url);
        return None;
    }

    let password = PASSWORD_REGEX
        .captures(meeting_url)
        .and_then(|c| c.get(1))
        .map(|pwd| pwd.as_str().to_owned());

    let (_, path) = meeting_url.split_once(MEETING_DOMAIN)?;
    let mut segments = path.split('/').skip(1);
    let kind = segments.next()?;
    let id = segments.next()?;

    let meeting = if kind.eq_ignore_ascii_case("my") {
        id.split('?').next().unwrap_or(id).to_owned()
    } else {
        id.chars().take_while(char::is_ascii_digit).collect()
    };
    if meeting.is_empty() {
        return None;
    }
    Some((meeting, password))
}

#[cfg(test)]
mod spec {
    use super::parse;

    fn parsed(
        id: &str,
        pwd: Option<&str>,
    ) -> Option<(String, Option<String>)> {
        Some((id.to_owned(), pwd.map(ToOwned::to_owned)))
    }

    #[test]
    fn parses_standard_url() {
        assert_eq!(
            parse("https://zoom.us/j/1234567890?pwd=abcdef"),
            parsed("1234567890", Some("abcdef")),
        );
        assert_eq!(
            parse("https://zoom.us/j/92648182477"),
            parsed("92648182477", None),
        );
        assert_eq!(
            parse("https://us02web.zoom.us/j/74495491647"),
            parsed("74495491647", None),
        );
    }

    #[test]
    fn parses_subdomain_password_with_dot() {
        assert_eq!(
            parse(
                "https://acrons-team.zoom.us/j/98832106351\
                 ?pwd=LED1nQDsZvuIED3ccBTlw04Gzi0MOw.1",
            ),
            parsed("98832106351", Some("LED1nQDsZvuIED3ccBTlw04Gzi0MOw.1")),
        );
    }

    #[test]
    fn parses_passcode_notes() {
        for url in &[
            "https://us06web.zoom.us/j/88240852079 (Passcode: 584706)",
            "https://us06web.zoom.us/j/88240852079 (Passcode:584706)",
            "https://us06web.zoom.us/j/88240852079(passcode: 584706)",
        ] {
            assert_eq!(parse(url), parsed("88240852079", Some("584706")));
        }
    }

    #[test]
    fn parses_web_client_url() {
        assert_eq!(
            parse("https://app.zoom.us/wc/79642156509/"),
            parsed("79642156509", None),
        );
        assert_eq!(
            parse(
                "https://app.zoom.us/wc/81561946371/start\
                 ?fromPWA=1&pwd=aBMNeaTbJOStQrPCRT2fBrviRTp15D.1",
            ),
            parsed("81561946371", Some("aBMNeaTbJOStQrPCRT2fBrviRTp15D.1")),
        );
        assert_eq!(
            parse("https://app.zoom.us/wc/98110585089/start?fromPWA=1"),
            parsed("98110585089", None),
        );
    }

    #[test]
    fn parses_redirect_and_encoded_password() {
        assert_eq!(
            parse(
                "https://www.google.com/url\
                 ?q=https://zoom.us/j/1122334455?pwd=abc123",
            ),
            parsed("1122334455", Some("abc123")),
        );
        assert_eq!(
            parse(
                "https://zoom.us/j/5165671036\
                 ?pwd%3DaHkyUy9xcjBDczlDY3NOSCtXMlhMQT09&sa=D&source=calendar",
            ),
            parsed("5165671036", Some("aHkyUy9xcjBDczlDY3NOSCtXMlhMQT09")),
        );
    }

    #[test]
    fn parses_personal_meeting_room() {
        assert_eq!(
            parse("https://zoom.us/my/voelker.ai"),
            parsed("voelker.ai", None),
        );
        assert_eq!(
            parse("https://turing.zoom.us/my/marco.santos.turing"),
            parsed("marco.santos.turing", None),
        );
        assert_eq!(
            parse(
                "https://us06web.zoom.us/my/audiencelab\
                 ?pwd=YMTT1l9sJNYChkBfhBnuST2nSJQsD6.1",
            ),
            parsed("audiencelab", Some("YMTT1l9sJNYChkBfhBnuST2nSJQsD6.1")),
        );
    }

    #[test]
    fn rejects_foreign_urls() {
        assert_eq!(parse("https://invalid-url.com"), None);
        assert_eq!(parse("https://zoom.us/j/abcdefg"), None);
        assert_eq!(parse("zoom.us/j/1234567890"), None);
    }
}
