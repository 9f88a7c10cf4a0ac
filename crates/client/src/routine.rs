//! Daily routine logs, mortality records and mortality photos.

use std::path::PathBuf;

use kukkuta_core::routine::{
    MortalityRecord, MortalityRecordResponse, PhotoUploadResponse, RoutineData, RoutineQuery,
    RoutineResponse, RoutineUpdate, RoutineWithMortality,
};
use kukkuta_core::types::DbId;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiContext;

/// Multipart field name expected by the upload endpoint.
pub const PHOTO_FIELD: &str = "file";

/// File name used when the caller gives none.
pub const DEFAULT_PHOTO_NAME: &str = "mortality_photo.jpg";

const DEFAULT_PHOTO_MIME: &str = "image/jpeg";

/// A photo to upload, either on disk or already in memory.
#[derive(Debug, Clone)]
pub enum PhotoSource {
    Path(PathBuf),
    Bytes {
        data: Vec<u8>,
        file_name: String,
        mime: String,
    },
}

impl PhotoSource {
    /// In-memory JPEG with the default file name.
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self::Bytes {
            data,
            file_name: DEFAULT_PHOTO_NAME.to_string(),
            mime: DEFAULT_PHOTO_MIME.to_string(),
        }
    }

    async fn into_part(self) -> ClientResult<Part> {
        let (data, file_name, mime) = match self {
            Self::Path(path) => {
                let data = tokio::fs::read(&path).await?;
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(DEFAULT_PHOTO_NAME)
                    .to_string();
                let mime = mime_for(&file_name).to_string();
                (data, file_name, mime)
            }
            Self::Bytes {
                data,
                file_name,
                mime,
            } => (data, file_name, mime),
        };
        Ok(Part::bytes(data).file_name(file_name).mime_str(&mime)?)
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => DEFAULT_PHOTO_MIME,
    }
}

/// Failure of [`RoutineService::record_mortality_with_photo`].
#[derive(Debug, thiserror::Error)]
pub enum MortalityLinkError {
    /// Nothing reached the server; there is nothing to clean up.
    #[error("Mortality photo not uploaded: {0}")]
    NotUploaded(#[source] ClientError),

    /// The photo was stored but the record referencing it was not. The
    /// file at `file_url` is unreferenced on the server.
    #[error("Mortality record not saved, uploaded photo {file_url} is unreferenced: {source}")]
    Unlinked {
        file_url: String,
        #[source]
        source: ClientError,
    },
}

impl MortalityLinkError {
    /// URL of the uploaded file left without a record, if any.
    pub fn orphaned_file_url(&self) -> Option<&str> {
        match self {
            Self::NotUploaded(_) => None,
            Self::Unlinked { file_url, .. } => Some(file_url),
        }
    }
}

pub struct RoutineService {
    ctx: ApiContext,
}

impl RoutineService {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{suffix}", self.ctx.endpoints().routine_url())
    }

    pub async fn submit_routine_data(&self, data: &RoutineData) -> ClientResult<RoutineResponse> {
        data.validate()?;
        let request = self
            .ctx
            .authorized(Method::POST, self.url(""))
            .await?
            .json(data);
        self.ctx
            .send_json(request, "Failed to submit routine data")
            .await
    }

    /// Entries for the current farmer, newest first, optionally bounded by
    /// date.
    pub async fn get_my_routine_data(&self, query: &RoutineQuery) -> ClientResult<Vec<RoutineResponse>> {
        let request = self
            .ctx
            .authorized(Method::GET, self.url(""))
            .await?
            .query(&query.query_pairs());
        self.ctx
            .send_json(request, "Failed to fetch routine data")
            .await
    }

    pub async fn get_routine_data_by_id(&self, routine_id: DbId) -> ClientResult<RoutineWithMortality> {
        let request = self
            .ctx
            .authorized(Method::GET, self.url(&routine_id.to_string()))
            .await?;
        self.ctx
            .send_json(request, "Failed to fetch routine data")
            .await
    }

    pub async fn update_routine_data(
        &self,
        routine_id: DbId,
        patch: &RoutineUpdate,
    ) -> ClientResult<RoutineResponse> {
        let request = self
            .ctx
            .authorized(Method::PUT, self.url(&routine_id.to_string()))
            .await?
            .json(patch);
        self.ctx
            .send_json(request, "Failed to update routine data")
            .await
    }

    pub async fn delete_routine_data(&self, routine_id: DbId) -> ClientResult<()> {
        let request = self
            .ctx
            .authorized(Method::DELETE, self.url(&routine_id.to_string()))
            .await?;
        self.ctx
            .send_empty(request, "Failed to delete routine data")
            .await
    }

    /// Record deaths against a routine entry. A `photo_url` must come from
    /// a prior [`upload_mortality_photo`](Self::upload_mortality_photo).
    pub async fn submit_mortality_record(
        &self,
        record: &MortalityRecord,
    ) -> ClientResult<MortalityRecordResponse> {
        record.validate()?;
        let request = self
            .ctx
            .authorized(Method::POST, self.url("mortality"))
            .await?
            .json(record);
        self.ctx
            .send_json(request, "Failed to submit mortality record")
            .await
    }

    pub async fn get_mortality_records(
        &self,
        routine_data_id: Option<DbId>,
    ) -> ClientResult<Vec<MortalityRecordResponse>> {
        let pairs: Vec<(&str, String)> = routine_data_id
            .map(|id| ("routine_data_id", id.to_string()))
            .into_iter()
            .collect();
        let request = self
            .ctx
            .authorized(Method::GET, self.url("mortality"))
            .await?
            .query(&pairs);
        self.ctx
            .send_json(request, "Failed to fetch mortality records")
            .await
    }

    pub async fn delete_mortality_record(&self, mortality_id: DbId) -> ClientResult<()> {
        let request = self
            .ctx
            .authorized(Method::DELETE, self.url(&format!("mortality/{mortality_id}")))
            .await?;
        self.ctx
            .send_empty(request, "Failed to delete mortality record")
            .await
    }

    /// Upload a photo as a single-part multipart form. The returned
    /// `file_url` is not linked to anything until a mortality record
    /// references it.
    pub async fn upload_mortality_photo(&self, photo: PhotoSource) -> ClientResult<PhotoUploadResponse> {
        let part = photo.into_part().await?;
        let form = Form::new().part(PHOTO_FIELD, part);
        let request = self
            .ctx
            .authorized(Method::POST, self.url("upload-photo"))
            .await?
            .multipart(form);
        let uploaded: PhotoUploadResponse = self
            .ctx
            .send_json(request, "Failed to upload photo")
            .await?;
        tracing::debug!(file_url = %uploaded.file_url, "Uploaded mortality photo");
        Ok(uploaded)
    }

    /// Upload `photo`, then submit `record` referencing it.
    ///
    /// The two steps are not atomic and the backend has no way to delete
    /// an upload. If the second step fails the error names the
    /// unreferenced file so the caller can retry the submission with it.
    pub async fn record_mortality_with_photo(
        &self,
        photo: PhotoSource,
        mut record: MortalityRecord,
    ) -> Result<MortalityRecordResponse, MortalityLinkError> {
        record
            .validate()
            .map_err(|e| MortalityLinkError::NotUploaded(e.into()))?;

        let uploaded = self
            .upload_mortality_photo(photo)
            .await
            .map_err(MortalityLinkError::NotUploaded)?;

        record.photo_url = Some(uploaded.file_url.clone());
        match self.submit_mortality_record(&record).await {
            Ok(saved) => Ok(saved),
            Err(source) => {
                tracing::warn!(
                    file_url = %uploaded.file_url,
                    routine_data_id = record.routine_data_id,
                    error = %source,
                    "Mortality record failed after photo upload",
                );
                Err(MortalityLinkError::Unlinked {
                    file_url: uploaded.file_url,
                    source,
                })
            }
        }
    }
}
