// Share intents: cast text, Warpcast compose links and frame metadata.
//
// Everything here produces strings; opening a composer or rasterizing a
// card is left to the client.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::scoring::supporters::Supporter;

/// Default public origin of the dashboard.
pub const DEFAULT_APP_URL: &str = "https://activity-tracker.online";

const WARPCAST_COMPOSE_URL: &str = "https://warpcast.com/~/compose";

/// Characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URL query component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Cast text announcing a score, with a shoutout line when there are supporters.
pub fn share_text(score: u32, supporters: &[Supporter]) -> String {
    let mut text = format!("My Farcaster average engagement score is {score} 🚀\n");

    if !supporters.is_empty() {
        let mentions: Vec<String> = supporters.iter().map(|s| format!("@{}", s.handle)).collect();
        text.push_str(&format!(
            "Shoutout to my most based supporters:\n{}\n\n",
            mentions.join(" ")
        ));
    }

    text.push_str("Built on Base 💙");
    text
}

/// URL of the engagement frame for a score.
pub fn frame_url(app_url: &str, username: &str, score: u32, tier: &str) -> String {
    format!(
        "{}/api/frame/engagement?username={}&score={}&tier={}",
        app_url.trim_end_matches('/'),
        encode_component(username),
        score,
        encode_component(tier),
    )
}

/// Warpcast compose intent pre-filled with `text`.
pub fn compose_url(text: &str) -> String {
    format!("{WARPCAST_COMPOSE_URL}?text={}", encode_component(text))
}

/// Compose intent for clients that can't embed frames: the frame link
/// rides along at the end of the text.
pub fn compose_url_with_frame(text: &str, frame_url: &str) -> String {
    compose_url(&format!("{text}\n\n{frame_url}"))
}

/// Escape text for interpolation into HTML attributes and bodies.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Frame metadata page for a shared engagement score.
///
/// Carries Open Graph tags plus `fc:frame` tags with three buttons: check
/// your own score, share, and a link to the improvement guide.
pub fn frame_html(app_url: &str, username: &str, score: u32, tier: &str) -> String {
    let app = app_url.trim_end_matches('/');
    let image = format!(
        "{app}/api/frame/engagement-image?username={}&score={score}&tier={}",
        encode_component(username),
        encode_component(tier),
    );
    let check = format!("{app}/?username={}", encode_component(username));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Engagement Score</title>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta property="og:title" content="My Engagement Score: {score}/100" />
  <meta property="og:description" content="Check my Farcaster engagement score on Activity Tracker" />
  <meta property="og:image" content="{og_image}" />
  <meta property="og:type" content="website" />
  <meta property="fc:frame" content="vNext" />
  <meta property="fc:frame:image" content="{image}" />
  <meta property="fc:frame:image:aspect_ratio" content="1.91:1" />
  <meta property="fc:frame:button:1" content="Check Your Score" />
  <meta property="fc:frame:button:1:action" content="link" />
  <meta property="fc:frame:button:1:target" content="{check}" />
  <meta property="fc:frame:button:2" content="Share" />
  <meta property="fc:frame:button:2:action" content="post" />
  <meta property="fc:frame:button:2:target" content="{share}" />
  <meta property="fc:frame:button:3" content="Improve Today" />
  <meta property="fc:frame:button:3:action" content="link" />
  <meta property="fc:frame:button:3:target" content="{guide}" />
</head>
<body>
  <h1>{name}: {tier_text}</h1>
</body>
</html>
"#,
        og_image = escape_html(&format!("{app}/og-image.jpg")),
        image = escape_html(&image),
        check = escape_html(&check),
        share = escape_html(&format!("{app}/api/frame/share")),
        guide = escape_html(&format!("{app}/?tab=guide")),
        name = escape_html(username),
        tier_text = escape_html(tier),
    )
}
