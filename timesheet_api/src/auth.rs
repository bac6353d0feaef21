//! Provedores de token para autenticação Bearer
//!
//! A extensão obtém o token do SDK do Azure DevOps, que pode expirar durante a
//! sessão. O cliente pede o token atual antes de cada requisição e, ao receber
//! 401, pede um token renovado e repete a requisição uma única vez.

use futures_util::future::{self, BoxFuture};

/// Fonte de tokens de acesso para o `TimesheetClient`
pub trait TokenProvider: Send + Sync {
    /// Token atual (None = requisição sem header Authorization)
    fn token(&self) -> BoxFuture<'_, Option<String>>;

    /// Token renovado após um 401
    ///
    /// Retornar None indica que não há como renovar; o cliente então
    /// desiste sem repetir a requisição.
    fn refresh_token(&self) -> BoxFuture<'_, Option<String>>;
}

/// Token fixo (PAT ou token de serviço), sem renovação
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: if token.is_empty() { None } else { Some(token) },
        }
    }

    /// Provedor sem token (endpoints públicos, testes)
    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> BoxFuture<'_, Option<String>> {
        Box::pin(future::ready(self.token.clone()))
    }

    fn refresh_token(&self) -> BoxFuture<'_, Option<String>> {
        Box::pin(future::ready(None))
    }
}
