use crate::RepositoryError;

pub(crate) type Response<T> = Result<T, RepositoryError>;

/// Attaches the failing step to a database error.
pub(crate) trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, sea_orm::DbErr> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|source| RepositoryError::InSeaOrmDbErr {
            message: message.to_string(),
            source,
        })
    }
}

impl<T> IntoResponse<T> for Option<T> {
    fn into_response(self, message: &str) -> Response<T> {
        self.ok_or_else(|| RepositoryError::NoRow {
            message: message.to_string(),
        })
    }
}
