//! Category display formatting
//!
//! Lists the fixed income and expense category sets.

use crate::models::{Category, TransactionType};

/// Format both category sets as a tree, income first
pub fn format_category_sets() -> String {
    let mut output = String::new();

    for (i, transaction_type) in [TransactionType::Income, TransactionType::Expense]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("{} ({})\n", transaction_type.label(), transaction_type));

        let categories = Category::for_type(transaction_type);
        for (j, category) in categories.iter().enumerate() {
            let prefix = if j == categories.len() - 1 { "└── " } else { "├── " };
            output.push_str(&format!("  {}{} [{}]\n", prefix, category.label(), category.slug()));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_category_sets() {
        let output = format_category_sets();

        assert!(output.starts_with("収入 (income)\n"));
        assert!(output.contains("  ├── 給与 [salary]\n"));
        assert!(output.contains("  └── お小遣い [allowance]\n"));
        assert!(output.contains("支出 (expense)\n"));
        assert!(output.contains("  └── 交通費 [transport]\n"));
        assert!(output.find("給与").unwrap() < output.find("食費").unwrap());
    }
}
