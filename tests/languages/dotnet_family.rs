//! .NET language family integration tests
//!
//! Tests for C#. F# is analyzed by the functional family tests.

use semantic_extract::analyze_source;

use crate::common::{
    assert_class, assert_function, assert_method, assert_no_errors, class_names, import_modules,
};

mod csharp_tests {
    use super::*;

    #[test]
    fn test_csharp_interface_and_implementation() {
        let source = r#"using System.Threading.Tasks;

namespace Billing
{
    public interface IInvoiceStore
    {
        Task<Invoice> Get(int id);
    }

    public sealed class SqlInvoiceStore : IInvoiceStore
    {
        private readonly string _connection;

        public SqlInvoiceStore(string connection)
        {
            _connection = connection;
        }

        public async Task<Invoice> Get(int id)
        {
            int Normalize(int raw) => raw < 0 ? 0 : raw;
            return await Query(Normalize(id));
        }
    }
}
"#;
        let result = analyze_source(source, "cs");
        assert_eq!(result.language, "csharp");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["System.Threading.Tasks"]);
        assert_eq!(class_names(&result), vec!["IInvoiceStore", "SqlInvoiceStore"]);

        let store = assert_class(&result, "SqlInvoiceStore");
        assert_eq!(store.extends.as_deref(), Some("IInvoiceStore"));
        assert_eq!(store.properties[0].name, "_connection");
        assert_eq!(store.properties[0].visibility.as_deref(), Some("private"));
        assert_method(store, "SqlInvoiceStore");
        let get = assert_method(store, "Get");
        assert!(get.is_async);
        assert_eq!(get.return_type.as_deref(), Some("Task<Invoice>"));
        assert_eq!(get.parameters[0].type_name.as_deref(), Some("int"));

        // Local functions are not type members
        let normalize = assert_function(&result, "Normalize");
        assert_eq!(normalize.parameters.len(), 1);

        let query = result.calls.iter().find(|c| c.callee == "Query").unwrap();
        assert_eq!(query.caller_function.as_deref(), Some("Get"));
        assert_eq!(query.arguments_count, 1);
    }
}
