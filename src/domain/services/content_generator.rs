use crate::domain::models::event::{EventRecord, GeneratedContent, Length, Tone};
use crate::domain::services::date_parser::{format_short_date, try_parse_date};
use chrono_tz::Tz;

pub const NOT_INFORMED: &str = "Não informado";

const CTA_SUFFIX: &str = "Quer saber mais? Acompanhe nossos canais para ficar por dentro dos próximos eventos e novidades!";

const PARTICIPATION_PARAGRAPH: &str = "Durante a programação, os participantes puderam interagir e debater sobre os temas propostos. A dinâmica do evento favoreceu a integração e o aprendizado prático, pontos elogiados pelos presentes.";

const EXPERT_PARAGRAPH: &str = "Especialistas apontam que iniciativas como esta são fundamentais para o desenvolvimento do setor. A repercussão positiva reforça a necessidade de continuidade e expansão para as próximas edições.";

fn tone_prefix(tone: Tone) -> &'static str {
    match tone {
        Tone::Journalistic => "Reportagem:",
        Tone::Institutional => "Comunicado:",
        Tone::Casual => "Blog:",
    }
}

fn tone_connective(tone: Tone) -> &'static str {
    match tone {
        Tone::Journalistic => "Foi um momento ímpar para todos os presentes.",
        Tone::Institutional => "A ação alinha-se às estratégias de crescimento da organização.",
        Tone::Casual => "Foi um momento leve e descontraído, aproveitado por todos os presentes!",
    }
}

fn tone_label(tone: Tone) -> &'static str {
    match tone {
        Tone::Journalistic => "jornalistico",
        Tone::Institutional => "institucional",
        Tone::Casual => "descontraido",
    }
}

fn length_label(length: Length) -> &'static str {
    match length {
        Length::Short => "curto",
        Length::Medium => "medio",
        Length::Long => "longo",
    }
}

/// Builds the summary and article for an event. Pure: the only inputs are the
/// record and the timezone used to print its date.
pub fn generate(event: &EventRecord, tz: Tz) -> GeneratedContent {
    let date = try_parse_date(&event.date, tz)
        .map(|dt| format_short_date(dt, tz))
        .unwrap_or_else(|| NOT_INFORMED.to_string());
    let location = event.location.as_deref().filter(|l| !l.trim().is_empty());
    let organizers = event.organizers_display();
    let first_method = event.method_and_scale.first().map(String::as_str).unwrap_or(NOT_INFORMED);

    GeneratedContent {
        summary: build_summary(event, &date, location, organizers.as_deref(), first_method),
        article: build_article(event, &date, location, organizers.as_deref()),
    }
}

fn build_summary(
    event: &EventRecord,
    date: &str,
    location: Option<&str>,
    organizers: Option<&str>,
    first_method: &str,
) -> String {
    let mut summary = format!(
        "{} O evento \"{}\" realizado em {}{} reuniu participantes para {}.",
        tone_prefix(event.tone),
        event.title,
        date,
        location.map(|l| format!(" no local {}", l)).unwrap_or_default(),
        first_method,
    );

    if let Some(first_reason) = event.rationale.first() {
        summary.push_str(&format!(" Como principal resultado, destacamos: {}.", first_reason));
    }

    if event.length != Length::Short {
        let who = organizers
            .map(|o| format!("do(a) {}", o))
            .unwrap_or_else(|| "da organização".to_string());
        summary.push_str(&format!(" A iniciativa reforça o compromisso {} com o setor.", who));
    }

    summary
}

fn build_article(event: &EventRecord, date: &str, location: Option<&str>, organizers: Option<&str>) -> String {
    let methods = if event.method_and_scale.is_empty() {
        vec![NOT_INFORMED.to_string()]
    } else {
        event.method_and_scale.clone()
    };

    let lead = format!(
        "Em {}, {} o evento \"{}\", organizado por {}. O encontro teve como foco principal {}.",
        date,
        location.map(|l| format!("{} sediou", l)).unwrap_or_else(|| "ocorreu".to_string()),
        event.title,
        organizers.unwrap_or("nossa equipe"),
        methods.join(", "),
    );

    let mut paragraphs = vec![lead];

    if event.length >= Length::Medium {
        paragraphs.push(format!(
            "Com o objetivo de {}, o evento proporcionou um ambiente rico para troca de experiências e networking. {}",
            methods.join(" e "),
            tone_connective(event.tone),
        ));

        if !event.rationale.is_empty() {
            let tail = if event.rationale.len() > 1 {
                "Esses números comprovam a eficácia da iniciativa."
            } else {
                "Um marco importante para o projeto."
            };
            paragraphs.push(format!(
                "Os resultados alcançados superaram as expectativas. Destaque para: {}. {}",
                event.rationale.join(", "),
                tail,
            ));
        }
    }

    if event.length == Length::Long {
        paragraphs.push(PARTICIPATION_PARAGRAPH.to_string());
        paragraphs.push(EXPERT_PARAGRAPH.to_string());
    }

    let mut article = format!("{}\n\n{}", event.title.to_uppercase(), paragraphs.join("\n\n"));
    if event.include_cta {
        article.push_str("\n\n");
        article.push_str(CTA_SUFFIX);
    }
    article
}

/// Prompt handed to an external writer model; it mirrors the generator inputs.
pub fn build_llm_prompt(event: &EventRecord) -> String {
    let system = "Você é um redator profissional em pt-BR. Não invente dados.";

    let user = format!(
        r#"Crie um resumo e uma matéria sobre o seguinte evento:

Evento: {title}
Data: {date}
Local: {location}
Organizador: {organizer}
Objetivos: {objectives}
Resultados: {results}

Configurações:
- Tom: {tone}
- Tamanho: {length}
- Incluir CTA: {cta}

Formato de saída desejado:
(A) Resumo
(B) Matéria estruturada (Título, Linha fina, Lead, Corpo, Destaques, Resultados, CTA se solicitado)"#,
        title = event.title,
        date = event.date,
        location = event.location.as_deref().unwrap_or(NOT_INFORMED),
        organizer = event.organizers_display().as_deref().unwrap_or(NOT_INFORMED),
        objectives = event.rationale.join(", "),
        results = event.method_and_scale.join(", "),
        tone = tone_label(event.tone),
        length = length_label(event.length),
        cta = if event.include_cta { "Sim" } else { "Não" },
    );

    format!("System: {}\nUser: {}", system, user)
}
