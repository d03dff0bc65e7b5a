use crate::error::{AppError, AppResult};
use crate::models::Schema;
use askdb_llm_sdk::client::LlmClient;
use askdb_llm_sdk::types::{CompletionRequest, Message};
use tracing::debug;

const MAX_COMPLETION_TOKENS: u32 = 1024;

/// Instruction template. `{schema}` is spliced in textually before the
/// placeholder pass; `{question}` is a placeholder resolved by it.
const PROMPT_TEMPLATE: &str = "\
You are an expert in converting natural language questions into correct SQL queries.
You are given a SQLite database schema:

{schema}

Rules:
1. Only output ONE valid SQLite statement. Never produce more than one.
2. Do not include explanations, comments, markdown, or code fences.
3. Use only the table and column names from the schema.
4. Handle joins correctly when data is spread across multiple tables
   (e.g. employees and their salaries).
5. Use correct aggregate functions: AVG, SUM, MIN, MAX, COUNT.
6. For \"highest\" or \"lowest\", use ORDER BY ... DESC/ASC with LIMIT 1.
7. Be case insensitive when matching text values (use LIKE if needed).
8. Always generate executable SQLite queries.

Now, convert this English question into exactly ONE SQL statement:
{question}
";

/// Translate a natural-language question into SQL via the LLM.
///
/// Returns the model's response text verbatim: no statement extraction, no
/// formatting cleanup. The executor's single-statement gate deals with
/// rule-breaking output.
pub async fn translate(
    llm: &dyn LlmClient,
    model: &str,
    schema: &Schema,
    question: &str,
) -> AppResult<String> {
    let prompt = build_prompt(schema, question)?;
    debug!(provider = llm.provider_name(), model, "translating question to SQL");

    let response = llm
        .complete(CompletionRequest {
            messages: vec![Message::user(prompt)],
            max_tokens: MAX_COMPLETION_TOKENS,
            model: model.to_string(),
            system: None,
            temperature: None,
            top_p: None,
            stop_sequences: None,
        })
        .await?;

    Ok(response.text())
}

/// Assemble the full prompt: schema lines spliced into the template, then a
/// placeholder pass that resolves `{question}` and unescapes `{{`/`}}`.
pub fn build_prompt(schema: &Schema, question: &str) -> AppResult<String> {
    let schema_str = render_schema(schema);
    let template = PROMPT_TEMPLATE.replace("{schema}", &schema_str);
    render_template(&template, &[("question", question)])
}

/// One line per table: `<table>: [<col1>, <col2>, ...]`.
///
/// Literal braces in identifiers are escaped so the placeholder pass cannot
/// mistake them for substitutions.
pub fn render_schema(schema: &Schema) -> String {
    schema
        .iter()
        .map(|table| {
            format!(
                "{}: [{}]",
                escape_braces(&table.name),
                table
                    .columns
                    .iter()
                    .map(|c| escape_braces(c))
                    .collect::<Vec<String>>()
                    .join(", ")
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn escape_braces(s: &str) -> String {
    s.replace('{', "{{").replace('}', "}}")
}

/// Minimal template renderer: `{name}` substitutes a variable, `{{` and
/// `}}` are literal braces, an unknown placeholder is an error.
fn render_template(template: &str, vars: &[(&str, &str)]) -> AppResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(AppError::Internal(
                                "unterminated placeholder in prompt template".to_string(),
                            ))
                        }
                    }
                }
                match vars.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        return Err(AppError::Internal(format!(
                            "unknown placeholder {{{name}}} in prompt template"
                        )))
                    }
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
