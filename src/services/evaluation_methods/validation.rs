use std::collections::HashSet;

use crate::models::evaluation_methods::requests::EvaluationTypeInput;
use crate::utils::validate::non_blank;

/// 校验并规范化评分选项：至少一项，名称非空且不重复，分值为非负有限数
pub fn normalize_types(
    types: Vec<EvaluationTypeInput>,
) -> Result<Vec<EvaluationTypeInput>, String> {
    if types.is_empty() {
        return Err("O método de avaliação precisa de pelo menos uma opção".to_string());
    }

    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(types.len());
    for input in types {
        let name = non_blank(&input.name)
            .ok_or_else(|| "O nome da opção não pode ser vazio".to_string())?
            .to_string();
        if !input.value.is_finite() || input.value < 0.0 {
            return Err(format!("Valor inválido para a opção '{name}'"));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(format!("Opção duplicada: '{name}'"));
        }
        normalized.push(EvaluationTypeInput {
            name,
            value: input.value,
        });
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(name: &str, value: f64) -> EvaluationTypeInput {
        EvaluationTypeInput {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_accepts_ordered_options() {
        let types =
            normalize_types(vec![option(" Ruim ", 0.0), option("Bom", 5.0), option("Ótimo", 10.0)])
                .unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(types[0].name, "Ruim");
        assert_eq!(types[2].value, 10.0);
    }

    #[test]
    fn test_rejects_empty_list() {
        assert!(normalize_types(vec![]).is_err());
    }

    #[test]
    fn test_rejects_duplicates_case_insensitively() {
        assert!(normalize_types(vec![option("Bom", 1.0), option("bom", 2.0)]).is_err());
    }

    #[test]
    fn test_rejects_negative_and_non_finite_values() {
        assert!(normalize_types(vec![option("Ruim", -1.0)]).is_err());
        assert!(normalize_types(vec![option("Ruim", f64::NAN)]).is_err());
        assert!(normalize_types(vec![option("Ruim", f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_rejects_blank_name() {
        assert!(normalize_types(vec![option("   ", 1.0)]).is_err());
    }
}
