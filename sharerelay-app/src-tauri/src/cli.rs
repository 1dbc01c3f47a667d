//! Share intents passed on the command line.
//!
//! Desktop hosts have no share sheet, so `--share-text` stands in for one. A
//! second launch with the flag reaches the running instance through the
//! single-instance plugin.

use std::ffi::OsString;

use tauri_plugin_sharerelay::{ShareIntent, ACTION_SEND, MIME_TEXT_PLAIN};
use tracing::debug;

const SHARE_FLAGS: [&str; 2] = ["--share-text", "--share-type"];

fn command() -> clap::Command {
    clap::Command::new("sharerelay-app")
        .about("Receives shared text and hands it to the webview")
        .version(clap::crate_version!())
        .arg(
            clap::Arg::new("share-text")
                .long("share-text")
                .help("Text to deliver as a share intent")
                .value_name("TEXT")
                .num_args(1)
                .allow_hyphen_values(true),
        )
        .arg(
            clap::Arg::new("share-type")
                .long("share-type")
                .help("MIME type of the shared content")
                .value_name("MIME")
                .num_args(1)
                .allow_hyphen_values(true)
                .default_value(MIME_TEXT_PLAIN),
        )
}

/// Keep the program name and the share flags with their values.
///
/// Second launches forward a foreign argv; anything else in it, including
/// arguments that are not UTF-8, must not fail the parse.
fn share_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let (separate, inline) = match arg.to_str() {
            Some(arg) => (
                SHARE_FLAGS.contains(&arg),
                SHARE_FLAGS.iter().any(|flag| {
                    arg.strip_prefix(flag)
                        .is_some_and(|value| value.starts_with('='))
                }),
            ),
            None => (false, false),
        };

        if separate {
            kept.push(arg);
            kept.extend(args.next());
        } else if inline {
            kept.push(arg);
        }
    }
    kept
}

/// Build a share intent from a full argv (program name first).
pub fn share_intent_from_args<I, T>(args: I) -> Option<ShareIntent>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let matches = match command().try_get_matches_from(share_args(args)) {
        Ok(matches) => matches,
        Err(e) => {
            debug!("Ignoring unparseable share arguments: {}", e);
            return None;
        }
    };

    let text = matches.get_one::<String>("share-text")?;
    let mime_type = matches.get_one::<String>("share-type").cloned();
    Some(ShareIntent::new(ACTION_SEND, mime_type, Some(text.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_text_flag() {
        let intent =
            share_intent_from_args(["sharerelay-app", "--share-text", "hello there"]).unwrap();
        assert!(intent.is_plain_text_send());
        assert_eq!(intent.text.as_deref(), Some("hello there"));
    }

    #[test]
    fn test_share_type_flag() {
        let intent = share_intent_from_args([
            "sharerelay-app",
            "--share-text",
            "photo.png",
            "--share-type",
            "image/png",
        ])
        .unwrap();
        assert_eq!(intent.mime_type.as_deref(), Some("image/png"));
        assert!(!intent.is_plain_text_send());
    }

    #[test]
    fn test_unrelated_arguments_before_flag() {
        let unknown =
            share_intent_from_args(["sharerelay-app", "--unknown", "--share-text", "hi"]).unwrap();
        assert_eq!(unknown.text.as_deref(), Some("hi"));

        let positional =
            share_intent_from_args(["sharerelay-app", "positional", "--share-text", "hi"])
                .unwrap();
        assert_eq!(positional.text.as_deref(), Some("hi"));

        let after = share_intent_from_args([
            "sharerelay-app",
            "--share-text",
            "hi",
            "-x",
            "trailing.txt",
        ])
        .unwrap();
        assert_eq!(after.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_inline_flag_value() {
        let intent = share_intent_from_args(["sharerelay-app", "--share-text=a=b"]).unwrap();
        assert_eq!(intent.text.as_deref(), Some("a=b"));
    }

    #[test]
    fn test_share_text_with_leading_dash() {
        let intent =
            share_intent_from_args(["sharerelay-app", "--share-text", "-leading dash"]).unwrap();
        assert_eq!(intent.text.as_deref(), Some("-leading dash"));
        assert!(intent.is_plain_text_send());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_is_tolerated() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("sharerelay-app"),
            OsString::from_vec(vec![0x66, 0x6f, 0x80, 0x6f]),
            OsString::from("--share-text"),
            OsString::from("hi"),
        ];
        let intent = share_intent_from_args(args).unwrap();
        assert_eq!(intent.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_help_flag_is_not_intercepted() {
        let intent =
            share_intent_from_args(["sharerelay-app", "--help", "--share-text", "hi"]).unwrap();
        assert_eq!(intent.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_no_share_flag() {
        assert!(share_intent_from_args(["sharerelay-app"]).is_none());
        assert!(share_intent_from_args(["sharerelay-app", "--unrelated"]).is_none());
    }
}
