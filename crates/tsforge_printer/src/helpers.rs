//! Runtime helpers and their ordering.

use std::cmp::Ordering;
use tsforge_ast::EmitHelper;

pub static EXTENDS_HELPER: EmitHelper = EmitHelper {
    name: "typescript:extends",
    scoped: false,
    priority: Some(0),
    text: r#"var __extends = (this && this.__extends) || (function () {
    var extendStatics = function (d, b) {
        extendStatics = Object.setPrototypeOf ||
            ({ __proto__: [] } instanceof Array && function (d, b) { d.__proto__ = b; }) ||
            function (d, b) { for (var p in b) if (Object.prototype.hasOwnProperty.call(b, p)) d[p] = b[p]; };
        return extendStatics(d, b);
    };
    return function (d, b) {
        if (typeof b !== "function" && b !== null)
            throw new TypeError("Class extends value " + String(b) + " is not a constructor or null");
        extendStatics(d, b);
        function __() { this.constructor = d; }
        d.prototype = b === null ? Object.create(b) : (__.prototype = b.prototype, new __());
    };
})();"#,
};

pub static ASSIGN_HELPER: EmitHelper = EmitHelper {
    name: "typescript:assign",
    scoped: false,
    priority: Some(1),
    text: r#"var __assign = (this && this.__assign) || function () {
    __assign = Object.assign || function(t) {
        for (var s, i = 1, n = arguments.length; i < n; i++) {
            s = arguments[i];
            for (var p in s) if (Object.prototype.hasOwnProperty.call(s, p))
                t[p] = s[p];
        }
        return t;
    };
    return __assign.apply(this, arguments);
};"#,
};

pub static AWAITER_HELPER: EmitHelper = EmitHelper {
    name: "typescript:awaiter",
    scoped: false,
    priority: Some(5),
    text: r#"var __awaiter = (this && this.__awaiter) || function (thisArg, _arguments, P, generator) {
    function adopt(value) { return value instanceof P ? value : new P(function (resolve) { resolve(value); }); }
    return new (P || (P = Promise))(function (resolve, reject) {
        function fulfilled(value) { try { step(generator.next(value)); } catch (e) { reject(e); } }
        function rejected(value) { try { step(generator["throw"](value)); } catch (e) { reject(e); } }
        function step(result) { result.done ? resolve(result.value) : adopt(result.value).then(fulfilled, rejected); }
        step((generator = generator.apply(thisArg, _arguments || [])).next());
    });
};"#,
};

/// Lower priorities first; helpers without a priority go last. Ties keep
/// their request order.
pub fn compare_emit_helpers(x: &EmitHelper, y: &EmitHelper) -> Ordering {
    match (x.priority, y.priority) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn sorted_emit_helpers(helpers: &[&'static EmitHelper]) -> Vec<&'static EmitHelper> {
    let mut sorted = helpers.to_vec();
    sorted.sort_by(|a, b| compare_emit_helpers(a, b));
    sorted
}

/// Lines of `text` with their common leading indentation removed. Blank
/// lines are dropped.
pub(crate) fn helper_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    let indentation = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .into_iter()
        .map(|line| line.get(indentation..).unwrap_or(""))
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    static LATE: EmitHelper = EmitHelper {
        name: "late",
        scoped: false,
        priority: None,
        text: "var late;",
    };

    #[test]
    fn test_sort_by_priority() {
        let sorted = sorted_emit_helpers(&[&LATE, &AWAITER_HELPER, &EXTENDS_HELPER]);
        let names: Vec<&str> = sorted.iter().map(|h| h.name).collect();
        assert_eq!(names, ["typescript:extends", "typescript:awaiter", "late"]);
    }

    #[test]
    fn test_helper_lines_strip_common_indent() {
        let lines = helper_lines("    a\n        b\n\n    c");
        assert_eq!(lines, ["a", "    b", "c"]);
    }
}
