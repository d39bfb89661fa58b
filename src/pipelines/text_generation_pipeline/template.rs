use std::sync::Arc;

use minijinja::{context, Environment};

use crate::core::Message;

const LLAMA3_TEMPLATE: &str = "{{ bos_token }}{% for message in messages %}<|start_header_id|>{{ message.role }}<|end_header_id|>\n\n{{ message.content | trim }}<|eot_id|>{% endfor %}{% if add_generation_prompt %}<|start_header_id|>assistant<|end_header_id|>\n\n{% endif %}";

/// Renders a conversation into the raw prompt a model was trained on.
#[derive(Clone)]
pub struct ChatTemplate {
    env: Arc<Environment<'static>>,
    bos_token: &'static str,
}

impl ChatTemplate {
    /// Llama 3 instruct format. The prompt ends with an open assistant header.
    pub fn llama3() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.add_template("chat", LLAMA3_TEMPLATE)?;
        Ok(Self {
            env: Arc::new(env),
            bos_token: "<|begin_of_text|>",
        })
    }

    pub fn render(&self, messages: &[Message]) -> anyhow::Result<String> {
        let rendered = self.env.get_template("chat")?.render(context! {
            messages => messages,
            bos_token => self.bos_token,
            add_generation_prompt => true,
        })?;
        Ok(rendered)
    }
}

impl std::fmt::Debug for ChatTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatTemplate")
            .field("bos_token", &self.bos_token)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llama3_prompt_layout() {
        let template = ChatTemplate::llama3().unwrap();
        let prompt = template
            .render(&[
                Message::system("Give a one or two word answers only."),
                Message::user("What is capital of America?  "),
            ])
            .unwrap();
        assert_eq!(
            prompt,
            "<|begin_of_text|>\
             <|start_header_id|>system<|end_header_id|>\n\nGive a one or two word answers only.<|eot_id|>\
             <|start_header_id|>user<|end_header_id|>\n\nWhat is capital of America?<|eot_id|>\
             <|start_header_id|>assistant<|end_header_id|>\n\n"
        );
    }

    #[test]
    fn empty_conversation_still_opens_assistant_turn() {
        let prompt = ChatTemplate::llama3().unwrap().render(&[]).unwrap();
        assert_eq!(
            prompt,
            "<|begin_of_text|><|start_header_id|>assistant<|end_header_id|>\n\n"
        );
    }
}
