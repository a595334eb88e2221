//! Scripting language family integration tests
//!
//! Tests for PHP, Python, Ruby, Bash, Lua, Perl, R and Julia.

use semantic_extract::analyze_source;

use crate::common::{
    assert_call, assert_class, assert_function, assert_method, assert_no_errors, assert_symbol,
    class_names, function_names, import_modules,
};

// =============================================================================
// PYTHON TESTS
// =============================================================================

mod python_tests {
    use super::*;

    #[test]
    fn test_python_module() {
        let source = r#"import logging
from dataclasses import dataclass, field

log = logging.getLogger(__name__)


@dataclass
class Job:
    name: str
    retries: int = 3

    def run(self) -> bool:
        log.info("running %s", self.name)
        return True


def schedule(jobs, delay=0):
    """Run every job."""
    for job in jobs:
        job.run()
"#;
        let result = analyze_source(source, "py");
        assert_eq!(result.language, "python");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["logging", "dataclasses"]);
        assert_eq!(result.imports[1].symbols, vec!["dataclass", "field"]);

        let job = assert_class(&result, "Job");
        assert_eq!(job.properties.len(), 2);
        let run = assert_method(job, "run");
        assert_eq!(run.return_type.as_deref(), Some("bool"));

        assert_eq!(function_names(&result), vec!["schedule"]);
        let schedule = assert_function(&result, "schedule");
        assert_eq!(schedule.line_start, 17);
        assert_eq!(schedule.line_end, 20);
        assert_eq!(schedule.parameters.len(), 2);
        assert_eq!(schedule.docstring.as_deref(), Some("Run every job."));

        let get_logger = result.calls.iter().find(|c| c.callee == "getLogger").unwrap();
        assert_eq!(get_logger.caller_function, None);
        assert_eq!(get_logger.receiver.as_deref(), Some("logging"));

        let info = result.calls.iter().find(|c| c.callee == "info").unwrap();
        assert_eq!(info.arguments_count, 2);
        assert_eq!(info.caller_function.as_deref(), Some("run"));
    }
}

// =============================================================================
// PHP TESTS
// =============================================================================

mod php_tests {
    use super::*;

    #[test]
    fn test_php_interface_and_class() {
        let source = r#"<?php

namespace App\Mail;

use App\Contracts\Mailer;

interface Transport
{
    public function send(string $to): bool;
}

final class SmtpMailer implements Mailer
{
    public function deliver(string $to, string $body): void
    {
        $this->log($to);
        mail($to, "subject", $body);
    }
}
"#;
        let result = analyze_source(source, "php");
        assert_eq!(result.language, "php");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["App\\Contracts\\Mailer"]);
        assert!(class_names(&result).contains(&"SmtpMailer"));

        let mailer = assert_class(&result, "SmtpMailer");
        assert_eq!(mailer.implements, vec!["Mailer"]);
        let deliver = assert_method(mailer, "deliver");
        assert_eq!(deliver.parameters.len(), 2);
        assert_eq!(deliver.parameters[1].name, "$body");
        assert_eq!(deliver.return_type.as_deref(), Some("void"));
        assert!(result.functions.is_empty());

        let mail = result.calls.iter().find(|c| c.callee == "mail").unwrap();
        assert_eq!(mail.arguments_count, 3);
        assert_eq!(mail.caller_function.as_deref(), Some("deliver"));
        let log = result.calls.iter().find(|c| c.callee == "log").unwrap();
        assert!(log.is_method_call);
        assert_eq!(log.receiver.as_deref(), Some("$this"));
    }
}

// =============================================================================
// RUBY TESTS
// =============================================================================

mod ruby_tests {
    use super::*;

    #[test]
    fn test_ruby_module_and_class() {
        let source = r#"require 'set'

class Inventory
  def initialize(items)
    @items = Set.new(items)
  end

  def include?(item)
    @items.include?(item)
  end
end

def report(inventory)
  puts inventory.inspect
end
"#;
        let result = analyze_source(source, "rb");
        assert_eq!(result.language, "ruby");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["set"]);
        let inventory = assert_class(&result, "Inventory");
        assert_method(inventory, "initialize");
        assert_eq!(assert_method(inventory, "include?").parameters.len(), 1);

        assert_eq!(function_names(&result), vec!["report"]);
        let set_new = result.calls.iter().find(|c| c.callee == "new").unwrap();
        assert_eq!(set_new.receiver.as_deref(), Some("Set"));
        assert_eq!(set_new.caller_function.as_deref(), Some("initialize"));
    }
}

// =============================================================================
// BASH TESTS
// =============================================================================

mod bash_tests {
    use super::*;

    #[test]
    fn test_shell_extensions_share_extractor() {
        let source = "#!/bin/sh\nbuild() {\n  make all\n}\nbuild\n";
        for ext in ["sh", "bash", "zsh"] {
            let result = analyze_source(source, ext);
            assert_eq!(result.language, "bash");
            assert_eq!(function_names(&result), vec!["build"]);
            let make = result.calls.iter().find(|c| c.callee == "make").unwrap();
            assert_eq!(make.caller_function.as_deref(), Some("build"));
            assert_call(&result, "build");
        }
    }
}

// =============================================================================
// LUA TESTS
// =============================================================================

mod lua_tests {
    use super::*;

    #[test]
    fn test_lua_module_table() {
        let source = r#"local M = {}

function M.greet(name)
  return string.format("hi %s", name)
end

return M
"#;
        let result = analyze_source(source, "lua");
        assert_eq!(result.language, "lua");
        assert_no_errors(&result);

        let greet = assert_function(&result, "M.greet");
        assert_eq!(greet.line_start, 3);
        assert_eq!(greet.line_end, 5);
        assert_symbol(&result, "M", "local");

        let format = result.calls.iter().find(|c| c.callee == "format").unwrap();
        assert_eq!(format.receiver.as_deref(), Some("string"));
        assert_eq!(format.arguments_count, 2);
    }
}

// =============================================================================
// PERL TESTS
// =============================================================================

mod perl_tests {
    use super::*;

    #[test]
    fn test_perl_module_and_test_extensions() {
        let source = r#"package My::Logger;
use strict;
use warnings;

sub new {
    my ($class) = @_;
    return bless {}, $class;
}

sub log_line {
    my ($self, $msg) = @_;
    print "$msg\n";
}

1;
"#;
        for ext in ["pl", "pm", "t"] {
            let result = analyze_source(source, ext);
            assert_eq!(result.language, "perl");
            assert_eq!(import_modules(&result), vec!["strict", "warnings"]);
            assert_eq!(class_names(&result), vec!["My::Logger"]);
            assert_eq!(function_names(&result), vec!["new", "log_line"]);
            assert_eq!(assert_function(&result, "log_line").line_start, 10);
        }
    }
}

// =============================================================================
// R TESTS
// =============================================================================

mod r_tests {
    use super::*;

    #[test]
    fn test_r_extension_case_does_not_matter() {
        let source = "library(stats)\n\nnormalize <- function(x, na.rm = TRUE) {\n  x / sum(x)\n}\n";
        let lower = analyze_source(source, "r");
        let upper = analyze_source(source, "R");
        assert_eq!(lower, upper);

        assert_eq!(lower.language, "r");
        assert_eq!(import_modules(&lower), vec!["stats"]);
        let normalize = assert_function(&lower, "normalize");
        assert_eq!(normalize.line_start, 3);
        let params: Vec<_> = normalize.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["x", "na.rm"]);
    }
}

// =============================================================================
// JULIA TESTS
// =============================================================================

mod julia_tests {
    use super::*;

    #[test]
    fn test_julia_script() {
        let source = r#"using Printf

struct Point
    x::Float64
    y::Float64
end

norm2(p::Point) = p.x^2 + p.y^2

function describe(p::Point)
    @printf("%f\n", norm2(p))
end
"#;
        let result = analyze_source(source, "jl");
        assert_eq!(result.language, "julia");
        assert_eq!(import_modules(&result), vec!["Printf"]);
        assert_eq!(class_names(&result), vec!["Point"]);

        let mut names = function_names(&result);
        names.sort_unstable();
        assert_eq!(names, vec!["describe", "norm2"]);

        let norm2 = assert_function(&result, "norm2");
        assert_eq!(norm2.line_start, 8);
        assert_eq!(norm2.parameters[0].type_name.as_deref(), Some("Point"));
    }
}
