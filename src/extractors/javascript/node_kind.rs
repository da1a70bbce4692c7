//! Node classification for the JavaScript grammar
//!
//! Maps tree-sitter kind strings onto a closed enum so dispatch sites match
//! exhaustively. Anything the extractor does not care about is `Unhandled`.

use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Program,
    Comment,
    // Callables
    FunctionDeclaration,
    GeneratorFunctionDeclaration,
    FunctionExpression,
    GeneratorFunction,
    ArrowFunction,
    // Classes
    ClassDeclaration,
    ClassExpression,
    ClassBody,
    ClassHeritage,
    MethodDefinition,
    FieldDefinition,
    // Declarations
    LexicalDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    // Modules
    ImportStatement,
    ImportClause,
    NamedImports,
    NamespaceImport,
    ImportSpecifier,
    ImportKeyword,
    ExportStatement,
    ExportClause,
    ExportSpecifier,
    NamespaceExport,
    // Statements and expressions
    ExpressionStatement,
    StatementBlock,
    AssignmentExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    ParenthesizedExpression,
    Arguments,
    Object,
    Pair,
    ObjectPattern,
    ArrayPattern,
    PairPattern,
    RestPattern,
    AssignmentPattern,
    ObjectAssignmentPattern,
    // Leaves
    Identifier,
    PropertyIdentifier,
    PrivatePropertyIdentifier,
    ShorthandPropertyIdentifier,
    ShorthandPropertyIdentifierPattern,
    String,
    TemplateString,
    This,
    Unhandled,
}

impl NodeKind {
    pub(crate) fn of(node: &Node) -> Self {
        Self::from_kind(node.kind())
    }

    pub(crate) fn from_kind(kind: &str) -> Self {
        match kind {
            "program" => NodeKind::Program,
            "comment" => NodeKind::Comment,
            "function_declaration" => NodeKind::FunctionDeclaration,
            "generator_function_declaration" => NodeKind::GeneratorFunctionDeclaration,
            "function_expression" => NodeKind::FunctionExpression,
            "generator_function" => NodeKind::GeneratorFunction,
            "arrow_function" => NodeKind::ArrowFunction,
            "class_declaration" => NodeKind::ClassDeclaration,
            "class" => NodeKind::ClassExpression,
            "class_body" => NodeKind::ClassBody,
            "class_heritage" => NodeKind::ClassHeritage,
            "method_definition" => NodeKind::MethodDefinition,
            "field_definition" | "public_field_definition" => NodeKind::FieldDefinition,
            "lexical_declaration" => NodeKind::LexicalDeclaration,
            "variable_declaration" => NodeKind::VariableDeclaration,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "import_statement" => NodeKind::ImportStatement,
            "import_clause" => NodeKind::ImportClause,
            "named_imports" => NodeKind::NamedImports,
            "namespace_import" => NodeKind::NamespaceImport,
            "import_specifier" => NodeKind::ImportSpecifier,
            "import" => NodeKind::ImportKeyword,
            "export_statement" => NodeKind::ExportStatement,
            "export_clause" => NodeKind::ExportClause,
            "export_specifier" => NodeKind::ExportSpecifier,
            "namespace_export" => NodeKind::NamespaceExport,
            "expression_statement" => NodeKind::ExpressionStatement,
            "statement_block" => NodeKind::StatementBlock,
            "assignment_expression" => NodeKind::AssignmentExpression,
            "call_expression" => NodeKind::CallExpression,
            "new_expression" => NodeKind::NewExpression,
            "member_expression" => NodeKind::MemberExpression,
            "parenthesized_expression" => NodeKind::ParenthesizedExpression,
            "arguments" => NodeKind::Arguments,
            "object" => NodeKind::Object,
            "pair" => NodeKind::Pair,
            "object_pattern" => NodeKind::ObjectPattern,
            "array_pattern" => NodeKind::ArrayPattern,
            "pair_pattern" => NodeKind::PairPattern,
            "rest_pattern" => NodeKind::RestPattern,
            "assignment_pattern" => NodeKind::AssignmentPattern,
            "object_assignment_pattern" => NodeKind::ObjectAssignmentPattern,
            "identifier" => NodeKind::Identifier,
            "property_identifier" => NodeKind::PropertyIdentifier,
            "private_property_identifier" => NodeKind::PrivatePropertyIdentifier,
            "shorthand_property_identifier" => NodeKind::ShorthandPropertyIdentifier,
            "shorthand_property_identifier_pattern" => {
                NodeKind::ShorthandPropertyIdentifierPattern
            }
            "string" => NodeKind::String,
            "template_string" => NodeKind::TemplateString,
            "this" => NodeKind::This,
            _ => NodeKind::Unhandled,
        }
    }

    /// Function-valued expressions (what a prototype or alias method may be bound to)
    pub(crate) fn is_function_value(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionExpression | NodeKind::GeneratorFunction | NodeKind::ArrowFunction
        )
    }

    pub(crate) fn is_function_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration | NodeKind::GeneratorFunctionDeclaration
        )
    }

    pub(crate) fn is_class(self) -> bool {
        matches!(self, NodeKind::ClassDeclaration | NodeKind::ClassExpression)
    }

    pub(crate) fn is_variable_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::LexicalDeclaration | NodeKind::VariableDeclaration
        )
    }
}

/// Declaration modifiers, read from a declaration's immediate children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Modifier {
    Async,
    Generator,
    Static,
    Getter,
    Setter,
}

impl Modifier {
    pub(crate) fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "async" => Some(Modifier::Async),
            "*" => Some(Modifier::Generator),
            "static" => Some(Modifier::Static),
            "get" => Some(Modifier::Getter),
            "set" => Some(Modifier::Setter),
            _ => None,
        }
    }
}

/// Modifiers present among `node`'s immediate children, in any order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Modifiers {
    pub is_async: bool,
    pub is_generator: bool,
    pub is_static: bool,
    pub is_getter: bool,
    pub is_setter: bool,
}

impl Modifiers {
    pub(crate) fn scan(node: &Node) -> Self {
        let mut modifiers = Modifiers::default();
        if matches!(
            NodeKind::of(node),
            NodeKind::GeneratorFunction | NodeKind::GeneratorFunctionDeclaration
        ) {
            modifiers.is_generator = true;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match Modifier::from_kind(child.kind()) {
                Some(Modifier::Async) => modifiers.is_async = true,
                Some(Modifier::Generator) => modifiers.is_generator = true,
                Some(Modifier::Static) => modifiers.is_static = true,
                Some(Modifier::Getter) => modifiers.is_getter = true,
                Some(Modifier::Setter) => modifiers.is_setter = true,
                None => {}
            }
        }
        modifiers
    }
}
