//! Plain-text validation report, written for people reading the run outside
//! the dashboard.

use std::fmt::Write as _;

use serde_json::{Map, Value};
use time::{macros::format_description, OffsetDateTime, UtcOffset};

use crate::core::format::{display_value, format_percent};
use crate::core::lookup::lookup_or;
use crate::core::payload::{EventWrapper, ValidationPayload};
use crate::core::record::{EventKind, ID_ALIASES, NAME_ALIASES, SCREEN_ALIASES};

const RULE: &str = "==================================================\n";
const NO_NAME: &str = "[sem nome]";
const NO_SCREEN: &str = "[sem tela]";

/// Share of events that must be correct for a run to pass with caveats.
const CAVEAT_THRESHOLD: f64 = 0.9;

pub fn text_report(payload: &ValidationPayload, now: OffsetDateTime) -> String {
    let local = now.to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));
    let date = local
        .format(&format_description!("[day]/[month]/[year]"))
        .unwrap_or_default();
    let time = local
        .format(&format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default();

    let resumo = payload.resumo;
    let missing = payload.eventos.list(EventKind::Missing);
    let errored = payload.eventos.list(EventKind::Errored);
    let total = resumo.total as f64;
    let correct_share = format_percent(resumo.corretos as f64, total);

    let mut out = String::new();
    out.push_str("\n# 📊 RELATÓRIO DE VALIDAÇÃO DE EVENTOS - ANÁLISE TÉCNICA\n\n");
    let _ = writeln!(out, "Data de execução: {date} às {time}");
    out.push_str(RULE);
    out.push('\n');

    out.push_str("## 📈 SUMÁRIO EXECUTIVO\n");
    out.push_str(RULE);
    let _ = writeln!(out, "✅ Total de Eventos Corretos: {} ({correct_share})", resumo.corretos);
    let _ = writeln!(
        out,
        "❌ Total de Eventos Ausentes: {} ({} se aplicável)",
        resumo.ausentes,
        format_percent(resumo.ausentes as f64, total)
    );
    let _ = writeln!(
        out,
        "⚠️ Total com Propriedades Erradas: {} ({} se aplicável)",
        resumo.com_erro,
        format_percent(resumo.com_erro as f64, total)
    );
    let _ = writeln!(out, "🧾 Total Processado: {} eventos\n", resumo.total);

    out.push_str("## 📉 DETALHAMENTO DOS EVENTOS AUSENTES\n");
    out.push_str(RULE);
    if missing.is_empty() {
        out.push_str("Nenhum evento ausente detectado na verificação atual.\n\n");
    }
    for (position, wrapper) in missing.iter().enumerate() {
        let subject = wrapper.subject();
        let _ = writeln!(out, "### Evento Ausente #{}", position + 1);
        let _ = writeln!(out, "- **ID:** {}", event_id(wrapper));
        let _ = writeln!(out, "- **Tela:** {}", lookup_or(subject, SCREEN_ALIASES, NO_SCREEN));
        let _ = writeln!(out, "- **Evento:** {}", lookup_or(subject, NAME_ALIASES, NO_NAME));
        for (key, value) in extra_fields(subject) {
            let _ = writeln!(out, "- **{key}:** {}", display_value(value));
        }
        out.push('\n');
    }

    out.push_str("## ⚠️ DETALHAMENTO DOS EVENTOS COM PROPRIEDADES INCORRETAS\n");
    out.push_str(RULE);
    if errored.is_empty() {
        out.push_str("```\nNenhum erro de propriedades detectado na verificação atual.\n```\n\n");
    }
    for (position, wrapper) in errored.iter().enumerate() {
        let subject = wrapper.subject();
        let _ = writeln!(out, "### Evento #{} com Propriedades Incorretas", position + 1);
        let _ = writeln!(out, "- **ID:** {}", event_id(wrapper));
        let _ = writeln!(out, "- **Tela:** {}", lookup_or(subject, SCREEN_ALIASES, NO_SCREEN));
        let _ = writeln!(out, "- **Evento:** {}", lookup_or(subject, NAME_ALIASES, NO_NAME));
        out.push_str("#### Discrepâncias Detectadas:\n");
        for (field, diff) in wrapper.diferencas().into_iter().flatten() {
            let _ = writeln!(out, "{field}:");
            let _ = writeln!(out, "- Esperado: {}", diff_side(diff, "esperado"));
            let _ = writeln!(out, "+ Registrado: {}", diff_side(diff, "log"));
        }
        out.push('\n');
    }

    out.push_str("## 🔍 ANÁLISE TÉCNICA DETALHADA\n");
    out.push_str(RULE);
    match payload.analise_ia.as_deref() {
        Some(analysis) => {
            let _ = writeln!(out, "{analysis}");
        }
        None => push_rule_based_analysis(&mut out, payload),
    }

    out.push_str("\n## 📋 CONCLUSÃO\n");
    out.push_str(RULE);
    let problems = resumo.ausentes + resumo.com_erro;
    if resumo.corretos == resumo.total {
        out.push_str("✅ **VALIDAÇÃO APROVADA**\n\n");
        out.push_str("O processo de validação foi concluído com sucesso. Todos os eventos estão implementados corretamente.\n");
    } else if resumo.corretos as f64 / total >= CAVEAT_THRESHOLD {
        out.push_str("⚠️ **VALIDAÇÃO COM RESSALVAS**\n\n");
        let _ = writeln!(
            out,
            "O processo de validação identificou {problems} problemas que precisam de atenção, mas a implementação está majoritariamente correta ({correct_share})."
        );
    } else {
        out.push_str("❌ **VALIDAÇÃO REPROVADA**\n\n");
        let _ = writeln!(
            out,
            "Foram identificados problemas significativos na implementação. Apenas {correct_share} dos eventos estão corretos."
        );
    }

    out.push('\n');
    out.push_str(RULE);
    out.push_str("Relatório gerado automaticamente pelo Sistema de Validação de Eventos\n");
    let _ = writeln!(
        out,
        "Versão: {} | Data: {date} | Hora: {time}",
        env!("CARGO_PKG_VERSION")
    );
    out
}

fn push_rule_based_analysis(out: &mut String, payload: &ValidationPayload) {
    let resumo = payload.resumo;
    out.push_str("### Síntese da Validação\n");
    if resumo.corretos == resumo.total {
        out.push_str("✅ **Resultado da Validação:** APROVADO\n\n");
        out.push_str("Todos os eventos foram implementados corretamente conforme as especificações.\n");
    } else if resumo.ausentes > 0 && resumo.com_erro > 0 {
        out.push_str("❌ **Resultado da Validação:** REPROVADO\n\n");
        let _ = writeln!(
            out,
            "Foram encontrados {} eventos ausentes e {} eventos com propriedades incorretas.",
            resumo.ausentes, resumo.com_erro
        );
    } else if resumo.ausentes > 0 {
        out.push_str("❌ **Resultado da Validação:** REPROVADO\n\n");
        let _ = writeln!(out, "Foram encontrados {} eventos ausentes.", resumo.ausentes);
    } else if resumo.com_erro > 0 {
        out.push_str("⚠️ **Resultado da Validação:** REQUER ATENÇÃO\n\n");
        let _ = writeln!(
            out,
            "Foram encontrados {} eventos com propriedades incorretas.",
            resumo.com_erro
        );
    }

    out.push_str("\n### Recomendações Técnicas\n");
    if resumo.ausentes > 0 {
        out.push_str("1. **Para eventos ausentes:**\n");
        out.push_str("   - Verificar se os elementos existem no DOM da página\n");
        out.push_str("   - Confirmar a implementação dos gatilhos de eventos\n");
        out.push_str("   - Revisar as condições que ativam o disparo dos eventos\n");
    }
    if resumo.com_erro > 0 {
        out.push_str("2. **Para propriedades incorretas:**\n");
        out.push_str("   - Padronizar a nomenclatura dos campos conforme especificação\n");
        out.push_str("   - Revisar o mapeamento de dados entre a interface e o rastreamento\n");
        out.push_str("   - Implementar validações de formato nos campos críticos\n");
    }
}

fn event_id(wrapper: &EventWrapper) -> String {
    lookup_or(wrapper.fields(), ID_ALIASES, "N/A")
}

fn diff_side(diff: &Value, side: &str) -> String {
    diff.get(side).map(display_value).unwrap_or_default()
}

/// Fields of a missing event besides its id, screen and name.
fn extra_fields(subject: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> + '_ {
    subject.iter().filter(|(key, _)| {
        let key = key.to_lowercase();
        ![ID_ALIASES, SCREEN_ALIASES, NAME_ALIASES]
            .iter()
            .any(|aliases| aliases.iter().any(|alias| alias.to_lowercase() == key))
    })
}
