use serde::Serialize;
use serde_json::{Map, Value};

/// One parameterized statement in the target graph store's query syntax.
/// Same text + named-parameter shape the store's driver consumes; emitted
/// here as data, since applying it is the collaborator's job.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub text: String,
    /// serde_json's map keeps keys sorted, so parameter order is stable
    /// for diffing between runs.
    pub params: Map<String, Value>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Map::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// Ordered creation script: every node-creation statement precedes every
/// relationship statement, because the store requires referenced nodes to
/// exist before relationship creation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreationScript {
    pub statements: Vec<Statement>,
}

impl CreationScript {
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_order_is_stable() {
        let statement = Statement::new("CREATE (n:Node {id: $id})")
            .param("zeta", 1)
            .param("alpha", 2);

        let keys: Vec<&String> = statement.params.keys().collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }
}
