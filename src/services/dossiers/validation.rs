use crate::models::dossiers::requests::{QuestionInput, SectionInput};
use crate::utils::validate::non_blank;

// 各章节权重之和的上限（百分比）
pub const MAX_TOTAL_WEIGHT: f64 = 100.0;

// 浮点累加误差容忍
const WEIGHT_EPSILON: f64 = 1e-9;

pub fn normalize_name(name: &str) -> Result<String, String> {
    non_blank(name)
        .map(str::to_string)
        .ok_or_else(|| "Nome do dossiê é obrigatório".to_string())
}

/// 校验并规范化章节树
///
/// 章节名称与问题文本去除首尾空白且不能为空；权重在 0..=100 之间，
/// 总和不超过 100
pub fn normalize_sections(sections: Vec<SectionInput>) -> Result<Vec<SectionInput>, String> {
    let mut total_weight = 0.0;
    let mut normalized = Vec::with_capacity(sections.len());

    for (index, section) in sections.into_iter().enumerate() {
        let position = index + 1;
        let name = non_blank(&section.name)
            .ok_or_else(|| format!("Seção {position}: nome é obrigatório"))?
            .to_string();

        if !section.weight.is_finite() || !(0.0..=MAX_TOTAL_WEIGHT).contains(&section.weight) {
            return Err(format!(
                "Seção '{name}': o peso deve estar entre 0 e {MAX_TOTAL_WEIGHT}"
            ));
        }
        total_weight += section.weight;

        let mut questions = Vec::with_capacity(section.questions.len());
        for (question_index, question) in section.questions.into_iter().enumerate() {
            let text = non_blank(&question.text).ok_or_else(|| {
                format!(
                    "Seção '{name}', questão {}: texto é obrigatório",
                    question_index + 1
                )
            })?;
            questions.push(QuestionInput {
                text: text.to_string(),
            });
        }

        normalized.push(SectionInput {
            name,
            description: section.description,
            weight: section.weight,
            questions,
        });
    }

    if total_weight > MAX_TOTAL_WEIGHT + WEIGHT_EPSILON {
        return Err(format!(
            "A soma dos pesos das seções ({total_weight}) não pode exceder {MAX_TOTAL_WEIGHT}"
        ));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, weight: f64, questions: &[&str]) -> SectionInput {
        SectionInput {
            name: name.to_string(),
            description: None,
            weight,
            questions: questions
                .iter()
                .map(|text| QuestionInput {
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_accepts_weights_up_to_one_hundred() {
        let sections = normalize_sections(vec![
            section(" Leitura ", 40.0, &["Lê em voz alta"]),
            section("Escrita", 60.0, &[" Ortografia ", "Caligrafia"]),
        ])
        .unwrap();
        assert_eq!(sections[0].name, "Leitura");
        assert_eq!(sections[1].questions[0].text, "Ortografia");
    }

    #[test]
    fn test_accepts_fractional_weights_summing_to_one_hundred() {
        let sections = vec![
            section("A", 33.3, &[]),
            section("B", 33.3, &[]),
            section("C", 33.4, &[]),
        ];
        assert!(normalize_sections(sections).is_ok());
    }

    #[test]
    fn test_rejects_total_weight_above_one_hundred() {
        let sections = vec![section("A", 60.0, &[]), section("B", 50.0, &[])];
        assert!(normalize_sections(sections).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        assert!(normalize_sections(vec![section("A", -1.0, &[])]).is_err());
        assert!(normalize_sections(vec![section("A", 101.0, &[])]).is_err());
        assert!(normalize_sections(vec![section("A", f64::NAN, &[])]).is_err());
    }

    #[test]
    fn test_rejects_blank_section_name_and_question_text() {
        assert!(normalize_sections(vec![section(" ", 10.0, &[])]).is_err());
        assert!(normalize_sections(vec![section("A", 10.0, &["  "])]).is_err());
    }

    #[test]
    fn test_empty_sections_are_allowed() {
        assert!(normalize_sections(vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Dossiê 1 ").unwrap(), "Dossiê 1");
        assert!(normalize_name("   ").is_err());
    }
}
