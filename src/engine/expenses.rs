// src/engine/expenses.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::engine::round_half_up;
use crate::models::result::{ExpenseBreakdown, ExpenseGroup, ExpenseLine};
use crate::models::scenario::{CustomExpense, ExpenseCategory};

/// Agrega despesas livres: total = soma de quantidade x valor unitário por
/// linha, agrupado por lote (crescente) e categoria para o detalhamento.
/// Nenhuma interação com alíquotas de mão de obra.
///
/// Retorna o detalhamento (valores de apresentação, arredondados) e o total
/// bruto sem arredondar, que é o que entra no subtotal.
pub fn aggregate(expenses: &[CustomExpense]) -> (ExpenseBreakdown, Decimal) {
    // BTreeMap garante a ordem (lote crescente, depois categoria),
    // independente da ordem de inserção.
    let mut groups: BTreeMap<(i32, ExpenseCategory), (Vec<ExpenseLine>, Decimal)> = BTreeMap::new();
    let mut raw_total = Decimal::ZERO;

    for expense in expenses {
        let line_total = expense.quantity * expense.unit_value;
        raw_total += line_total;

        let entry = groups
            .entry((expense.lot_number, expense.category))
            .or_insert_with(|| (Vec::new(), Decimal::ZERO));
        entry.0.push(ExpenseLine {
            description: expense.description.clone(),
            unit: expense.unit.clone(),
            quantity: expense.quantity,
            unit_value: expense.unit_value,
            total: round_half_up(line_total),
        });
        entry.1 += line_total;
    }

    let breakdown = ExpenseBreakdown {
        groups: groups
            .into_iter()
            .map(|((lot_number, category), (items, total))| ExpenseGroup {
                lot_number,
                category,
                items,
                total: round_half_up(total),
            })
            .collect(),
        total: round_half_up(raw_total),
    };

    (breakdown, raw_total)
}
