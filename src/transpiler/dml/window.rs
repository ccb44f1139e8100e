//! Window specification and ORDER BY term rendering.

use crate::ast::{FrameBound, NullsOrder, OrderTerm, SortOrder, WindowFrame, WindowSpec};
use crate::error::SqlResult;
use crate::transpiler::expressions::{compile_expr, compile_list};
use crate::transpiler::traits::DialectCompiler;

/// Body of `OVER (...)`: PARTITION BY is omitted when empty.
pub fn build_window_spec(spec: &WindowSpec, c: &dyn DialectCompiler) -> SqlResult<String> {
    let mut parts = Vec::new();
    if !spec.partition.is_empty() {
        parts.push(format!("PARTITION BY {}", compile_list(&spec.partition, c)?));
    }
    if !spec.order.is_empty() {
        parts.push(format!("ORDER BY {}", build_order_terms(&spec.order, c)?));
    }
    if let Some(frame) = &spec.frame {
        parts.push(build_frame(frame));
    }
    Ok(parts.join(" "))
}

/// `expr [ASC|DESC] [NULLS FIRST|LAST], ...`
pub fn build_order_terms(terms: &[OrderTerm], c: &dyn DialectCompiler) -> SqlResult<String> {
    let rendered = terms
        .iter()
        .map(|t| {
            let mut sql = compile_expr(&t.expr, c)?;
            match t.direction {
                Some(SortOrder::Asc) => sql.push_str(" ASC"),
                Some(SortOrder::Desc) => sql.push_str(" DESC"),
                None => {}
            }
            match t.nulls {
                Some(NullsOrder::First) => sql.push_str(" NULLS FIRST"),
                Some(NullsOrder::Last) => sql.push_str(" NULLS LAST"),
                None => {}
            }
            Ok(sql)
        })
        .collect::<SqlResult<Vec<_>>>()?;
    Ok(rendered.join(", "))
}

fn build_frame(frame: &WindowFrame) -> String {
    let (unit, start, end) = match frame {
        WindowFrame::Rows { start, end } => ("ROWS", start, end),
        WindowFrame::Range { start, end } => ("RANGE", start, end),
    };
    format!("{} BETWEEN {} AND {}", unit, frame_bound(start), frame_bound(end))
}

fn frame_bound(bound: &FrameBound) -> String {
    match bound {
        FrameBound::UnboundedPreceding => "UNBOUNDED PRECEDING".to_string(),
        FrameBound::Preceding(n) => format!("{} PRECEDING", n),
        FrameBound::CurrentRow => "CURRENT ROW".to_string(),
        FrameBound::Following(n) => format!("{} FOLLOWING", n),
        FrameBound::UnboundedFollowing => "UNBOUNDED FOLLOWING".to_string(),
    }
}
