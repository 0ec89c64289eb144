//! The per-layer transformations. Each layer has one encode function and,
//! except the application layer, one decode function; [`encode`] and
//! [`decode`] dispatch on the layer.

use super::outputs::{Output, Presentation};
use crate::{
    codec::{self, DecodeError, EncodeError},
    device::Route,
    header,
    layer::Layer,
    token::TokenSource,
};
use std::num::NonZeroUsize;

/// What the encode stages need besides the incoming value.
pub(crate) struct EncodeContext<'a> {
    pub route: &'a Route,
    pub segment_length: NonZeroUsize,
    pub tokens: &'a mut dyn TokenSource,
}

/// What the decode stages need besides the incoming value.
pub(crate) struct DecodeContext<'a> {
    pub segment_length: NonZeroUsize,
    /// The presentation encoding captured while encoding.
    pub captured_encoding: Option<&'a str>,
}

pub(crate) fn encode(
    layer: Layer,
    value: &str,
    context: &mut EncodeContext<'_>,
) -> Result<Output, EncodeError> {
    Ok(match layer {
        Layer::Application => Output::Text(value.to_string()),
        Layer::Presentation => Output::Presentation(Presentation {
            encoded: codec::encode_presentation(value)?,
            translated: codec::text_to_bits(value)?,
        }),
        Layer::Session => {
            let token = context.tokens.next_token();
            // The token travels through layer 1, so it needs an 8-bit code too.
            if token.is_empty()
                || token.contains(|c: char| c == '|' || c == ',')
                || codec::find_unsupported(&token).is_some()
            {
                return Err(EncodeError::InvalidSessionToken(token));
            }
            Output::Text(header::SESSION.prepend(&[&token], value))
        }
        Layer::Transport => Output::Text(codec::segment_and_join(value, context.segment_length)),
        Layer::Network => {
            let Route { sender, receiver } = context.route;
            Output::Text(header::NETWORK.prepend(
                &[sender.public_ip.to_string(), receiver.public_ip.to_string()],
                value,
            ))
        }
        Layer::DataLink => {
            let Route { sender, receiver } = context.route;
            Output::Text(header::DATA_LINK.prepend(
                &[sender.mac.to_string(), receiver.mac.to_string()],
                value,
            ))
        }
        Layer::Physical => Output::Text(codec::text_to_bits(value)?),
    })
}

/// Runs the decode stage of `layer`. The result belongs in the slot of the
/// layer above.
pub(crate) fn decode(
    layer: Layer,
    value: &str,
    context: &DecodeContext<'_>,
) -> Result<Output, DecodeError> {
    Ok(match layer {
        Layer::Physical => Output::Text(codec::bits_to_text(value)?),
        Layer::DataLink => Output::Text(strip_logged(header::DATA_LINK, value)?),
        Layer::Network => Output::Text(strip_logged(header::NETWORK, value)?),
        Layer::Transport => Output::Text(codec::desegment(value, context.segment_length)?),
        Layer::Session => {
            let bits = strip_logged(header::SESSION, value)?;
            let received = codec::bits_to_text(&bits)?;
            Output::Presentation(Presentation {
                encoded: codec::encode_presentation(&received)
                    .map_err(|_| DecodeError::PresentationMismatch)?,
                translated: bits,
            })
        }
        Layer::Presentation => {
            let captured = context
                .captured_encoding
                .ok_or(DecodeError::NothingCaptured)?;
            let text = codec::decode_presentation(captured)?;
            if codec::bits_to_text(value)? != text {
                Err(DecodeError::PresentationMismatch)?
            }
            Output::Text(text)
        }
        // The application layer is the end of the receive path.
        Layer::Application => Output::Text(value.to_string()),
    })
}

fn strip_logged(format: header::HeaderFormat, value: &str) -> Result<String, DecodeError> {
    let (fields, payload) = format.strip(value)?;
    for (key, field) in format.keys().iter().zip(fields) {
        tracing::debug!("Stripped {}:{}", key, field);
    }
    Ok(payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    fn len(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn session_tags_value() {
        let route = Registry::default().route();
        let mut tokens = || "abc123".to_string();
        let mut context = EncodeContext {
            route: &route,
            segment_length: len(32),
            tokens: &mut tokens,
        };
        let output = encode(Layer::Session, "0101", &mut context).unwrap();
        assert_eq!(output, Output::Text("SESSION_ID:abc123|0101".into()));
    }

    #[test]
    fn session_rejects_delimiters_in_token() {
        let route = Registry::default().route();
        let mut tokens = || "a|b".to_string();
        let mut context = EncodeContext {
            route: &route,
            segment_length: len(32),
            tokens: &mut tokens,
        };
        assert_eq!(
            encode(Layer::Session, "0101", &mut context),
            Err(EncodeError::InvalidSessionToken("a|b".into()))
        );
    }

    #[test]
    fn session_rejects_token_without_8_bit_code() {
        let route = Registry::default().route();
        let mut tokens = || "t\u{20ac}k".to_string();
        let mut context = EncodeContext {
            route: &route,
            segment_length: len(32),
            tokens: &mut tokens,
        };
        assert_eq!(
            encode(Layer::Session, "0101", &mut context),
            Err(EncodeError::InvalidSessionToken("t\u{20ac}k".into()))
        );
    }

    #[test]
    fn network_and_link_headers_use_route() {
        let route = Registry::default().route();
        let mut tokens = String::new;
        let mut context = EncodeContext {
            route: &route,
            segment_length: len(32),
            tokens: &mut tokens,
        };
        assert_eq!(
            encode(Layer::Network, "x", &mut context).unwrap(),
            Output::Text("IP_SRC:192.23.12.12,IP_DST:192.36.14.12|x".into())
        );
        assert_eq!(
            encode(Layer::DataLink, "x", &mut context).unwrap(),
            Output::Text("MAC_SRC:24-88-90-0-ff-ab,MAC_DST:aa-cd-ef-0-aa-54|x".into())
        );
    }

    #[test]
    fn presentation_decode_cross_checks_bits() {
        let context = DecodeContext {
            segment_length: len(32),
            captured_encoding: Some("SEk="),
        };
        assert_eq!(
            decode(Layer::Presentation, "0100100001001001", &context).unwrap(),
            Output::Text("HI".into())
        );
        assert_eq!(
            decode(Layer::Presentation, "0100100001001010", &context),
            Err(DecodeError::PresentationMismatch)
        );
    }

    #[test]
    fn session_decode_rebuilds_presentation() {
        let context = DecodeContext {
            segment_length: len(32),
            captured_encoding: Some("SEk="),
        };
        assert_eq!(
            decode(Layer::Session, "SESSION_ID:t0k|0100100001001001", &context).unwrap(),
            Output::Presentation(Presentation {
                encoded: "SEk=".into(),
                translated: "0100100001001001".into(),
            })
        );
    }
}
