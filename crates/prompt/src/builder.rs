//! Prompt builder for rendering the answer template.

use crate::template::{ANSWER_TEMPLATE, CONTEXT_VAR, QUESTION_VAR};
use pdfchat_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build the final prompt from a context block and the user's question.
///
/// Both values are substituted verbatim into the fixed answer template and
/// the result is trimmed.
///
/// # Example
/// ```
/// use pdfchat_prompt::build_prompt;
///
/// let prompt = build_prompt("[Trecho 1 | score=0.9000]\nTexto", "Qual o texto?").unwrap();
/// assert!(prompt.starts_with("CONTEXTO:"));
/// ```
pub fn build_prompt(context: &str, question: &str) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert(CONTEXT_VAR.to_string(), context.to_string());
    variables.insert(QUESTION_VAR.to_string(), question.to_string());

    let rendered = render_template(ANSWER_TEMPLATE, &variables)?;

    tracing::debug!("Built prompt ({} bytes)", rendered.len());

    Ok(rendered.trim().to_string())
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::NO_INFO_ANSWER;

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("pergunta".to_string(), "Olá & <mundo>".to_string());

        let result = render_template("Pergunta: {{pergunta}}", &vars).unwrap();
        assert_eq!(result, "Pergunta: Olá & <mundo>");
    }

    #[test]
    fn test_prompt_is_trimmed() {
        let prompt = build_prompt("contexto", "pergunta").unwrap();
        assert!(prompt.starts_with("CONTEXTO:\ncontexto\n\nREGRAS:"));
        assert!(prompt.ends_with("RESPONDA A \"PERGUNTA DO USUÁRIO\""));
    }

    #[test]
    fn test_prompt_sections_in_order() {
        let prompt = build_prompt("[Trecho 1 | score=0.8123]\nReceita", "Qual a receita?").unwrap();

        let sections = [
            "CONTEXTO:\n[Trecho 1 | score=0.8123]\nReceita",
            "REGRAS:",
            "- Responda somente com base no CONTEXTO.",
            "- Nunca invente ou use conhecimento externo.",
            "- Nunca produza opiniões ou interpretações além do que está escrito.",
            "EXEMPLOS DE PERGUNTAS FORA DO CONTEXTO:",
            "Pergunta: \"Qual é a capital da França?\"",
            "PERGUNTA DO USUÁRIO:\nQual a receita?",
            "RESPONDA A \"PERGUNTA DO USUÁRIO\"",
        ];

        let mut cursor = 0;
        for section in sections {
            let found = prompt[cursor..]
                .find(section)
                .unwrap_or_else(|| panic!("Missing section: {}", section));
            cursor += found + section.len();
        }

        assert_eq!(prompt.matches(NO_INFO_ANSWER).count(), 4);
    }

    #[test]
    fn test_question_with_braces_is_verbatim() {
        let prompt = build_prompt("ctx", "O que é {{contexto}}?").unwrap();
        assert!(prompt.contains("PERGUNTA DO USUÁRIO:\nO que é {{contexto}}?"));
    }
}
