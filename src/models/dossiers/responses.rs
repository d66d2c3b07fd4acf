use super::entities::Dossier;
use crate::models::common::PaginationInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DossierListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Dossier>,
}
