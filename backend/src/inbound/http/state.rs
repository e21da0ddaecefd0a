//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::portfolio::{Certificate, Experience, PortfolioEntry, Project, Skill};
use crate::domain::ports::{
    ContactSubmissionCommand, ContentCommand, ContentQuery, InboxCommand, InboxQuery, LoginService,
};

/// Read and write ports for one content collection.
pub struct ContentPorts<T: PortfolioEntry> {
    pub query: Arc<dyn ContentQuery<T>>,
    pub command: Arc<dyn ContentCommand<T>>,
}

impl<T: PortfolioEntry> Clone for ContentPorts<T> {
    fn clone(&self) -> Self {
        Self {
            query: Arc::clone(&self.query),
            command: Arc::clone(&self.command),
        }
    }
}

impl<T: PortfolioEntry> ContentPorts<T> {
    /// Use one service for both sides of the collection.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ContentQuery<T> + ContentCommand<T> + 'static,
    {
        Self {
            query: service.clone(),
            command: service,
        }
    }
}

/// Parameter object bundling the content collections.
#[derive(Clone)]
pub struct ContentState {
    pub projects: ContentPorts<Project>,
    pub skills: ContentPorts<Skill>,
    pub experiences: ContentPorts<Experience>,
    pub certificates: ContentPorts<Certificate>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub contact: Arc<dyn ContactSubmissionCommand>,
    pub inbox_query: Arc<dyn InboxQuery>,
    pub inbox: Arc<dyn InboxCommand>,
    pub content: ContentState,
}

/// Parameter object bundling the non-content ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub contact: Arc<dyn ContactSubmissionCommand>,
    pub inbox_query: Arc<dyn InboxQuery>,
    pub inbox: Arc<dyn InboxCommand>,
}

impl HttpState {
    /// Construct state from the port bundles.
    pub fn new(ports: HttpStatePorts, content: ContentState) -> Self {
        let HttpStatePorts {
            login,
            contact,
            inbox_query,
            inbox,
        } = ports;
        Self {
            login,
            contact,
            inbox_query,
            inbox,
            content,
        }
    }
}

/// Content types served over HTTP, resolving their ports from state.
pub trait ContentCollection: PortfolioEntry {
    /// Ports for this collection.
    fn ports(state: &HttpState) -> &ContentPorts<Self>;
}

impl ContentCollection for Project {
    fn ports(state: &HttpState) -> &ContentPorts<Self> {
        &state.content.projects
    }
}

impl ContentCollection for Skill {
    fn ports(state: &HttpState) -> &ContentPorts<Self> {
        &state.content.skills
    }
}

impl ContentCollection for Experience {
    fn ports(state: &HttpState) -> &ContentPorts<Self> {
        &state.content.experiences
    }
}

impl ContentCollection for Certificate {
    fn ports(state: &HttpState) -> &ContentPorts<Self> {
        &state.content.certificates
    }
}
