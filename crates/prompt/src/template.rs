//! Fixed answer template and refusal string.
//!
//! The wording constrains model behavior and is reproduced verbatim.

/// Answer returned when the context holds no evidence or the model is silent.
pub const NO_INFO_ANSWER: &str = "Não tenho informações necessárias para responder sua pergunta.";

/// Handlebars variable holding the formatted context block.
pub const CONTEXT_VAR: &str = "contexto";

/// Handlebars variable holding the user's question.
pub const QUESTION_VAR: &str = "pergunta";

/// Grounded-answer template. Rendered with [`CONTEXT_VAR`] and [`QUESTION_VAR`].
pub const ANSWER_TEMPLATE: &str = r#"
CONTEXTO:
{{contexto}}

REGRAS:
- Responda somente com base no CONTEXTO.
- Se a informação não estiver explicitamente no CONTEXTO, responda:
  "Não tenho informações necessárias para responder sua pergunta."
- Nunca invente ou use conhecimento externo.
- Nunca produza opiniões ou interpretações além do que está escrito.

EXEMPLOS DE PERGUNTAS FORA DO CONTEXTO:
Pergunta: "Qual é a capital da França?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

Pergunta: "Quantos clientes temos em 2024?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

Pergunta: "Você acha isso bom ou ruim?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

PERGUNTA DO USUÁRIO:
{{pergunta}}

RESPONDA A "PERGUNTA DO USUÁRIO"
"#;
