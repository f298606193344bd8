use crate::api::MovieId;

/// Session state threaded through the verification steps
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Bearer token obtained from the login step
    token: Option<String>,

    /// Movie created by this run (from the create response or the lookup scan)
    movie_id: Option<MovieId>,

    /// Movie removed by the delete step, checked for absence afterwards
    deleted_movie_id: Option<MovieId>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn remember_movie(&mut self, id: MovieId) {
        self.movie_id = Some(id);
    }

    pub fn movie_id(&self) -> Option<MovieId> {
        self.movie_id
    }

    /// Move the remembered movie to the deleted slot
    pub fn mark_deleted(&mut self) {
        self.deleted_movie_id = self.movie_id.take();
    }

    pub fn deleted_movie_id(&self) -> Option<MovieId> {
        self.deleted_movie_id
    }
}
