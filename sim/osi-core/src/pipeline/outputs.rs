use crate::layer::Layer;

/// The two values the presentation layer shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Presentation {
    /// Reversible base64 encoding of the text, for display.
    pub encoded: String,
    /// Each character as its 8-bit code. This is what moves down the stack.
    pub translated: String,
}

/// What one stage produced, before it is stored in its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Presentation(Presentation),
}

impl Output {
    /// The value handed to the next stage.
    pub fn carried(&self) -> &str {
        match self {
            Output::Text(text) => text,
            Output::Presentation(presentation) => &presentation.translated,
        }
    }
}

/// One slot per layer. A slot is `None` until a stage writes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerOutputs {
    pub application: Option<String>,
    pub presentation: Option<Presentation>,
    pub session: Option<String>,
    pub transport: Option<String>,
    pub network: Option<String>,
    pub data_link: Option<String>,
    pub physical: Option<String>,
}

impl LayerOutputs {
    pub fn is_populated(&self, layer: Layer) -> bool {
        self.carried(layer).is_some()
    }

    /// The value `layer` passes on: its text, or the bit translation for the
    /// presentation layer.
    pub fn carried(&self, layer: Layer) -> Option<&str> {
        match layer {
            Layer::Presentation => self
                .presentation
                .as_ref()
                .map(|presentation| presentation.translated.as_str()),
            other => self.text_slot(other).and_then(|slot| slot.as_deref()),
        }
    }

    pub(crate) fn store(&mut self, layer: Layer, output: Output) {
        match output {
            Output::Presentation(presentation) => self.presentation = Some(presentation),
            Output::Text(text) => {
                if let Some(slot) = self.text_slot_mut(layer) {
                    *slot = Some(text);
                }
            }
        }
    }

    fn text_slot(&self, layer: Layer) -> Option<&Option<String>> {
        match layer {
            Layer::Application => Some(&self.application),
            Layer::Presentation => None,
            Layer::Session => Some(&self.session),
            Layer::Transport => Some(&self.transport),
            Layer::Network => Some(&self.network),
            Layer::DataLink => Some(&self.data_link),
            Layer::Physical => Some(&self.physical),
        }
    }

    fn text_slot_mut(&mut self, layer: Layer) -> Option<&mut Option<String>> {
        match layer {
            Layer::Application => Some(&mut self.application),
            Layer::Presentation => None,
            Layer::Session => Some(&mut self.session),
            Layer::Transport => Some(&mut self.transport),
            Layer::Network => Some(&mut self.network),
            Layer::DataLink => Some(&mut self.data_link),
            Layer::Physical => Some(&mut self.physical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_stored() {
        let mut outputs = LayerOutputs::default();
        assert!(Layer::ALL.iter().all(|&layer| !outputs.is_populated(layer)));

        outputs.store(Layer::Network, Output::Text("IP_SRC:a,IP_DST:b|x".into()));
        assert_eq!(outputs.carried(Layer::Network), Some("IP_SRC:a,IP_DST:b|x"));
        assert!(!outputs.is_populated(Layer::DataLink));
    }

    #[test]
    fn presentation_carries_translation() {
        let mut outputs = LayerOutputs::default();
        outputs.store(
            Layer::Presentation,
            Output::Presentation(Presentation {
                encoded: "SEk=".into(),
                translated: "0100100001001001".into(),
            }),
        );
        assert_eq!(outputs.carried(Layer::Presentation), Some("0100100001001001"));
    }
}
