use crate::domain::models::event::Photo;
use crate::domain::models::table_row::{TableRow, TableRowFields, TableRowPage};
use crate::domain::ports::RemoteTableService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, multipart};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

pub struct BaserowTableService {
    client: Client,
    base_url: String,
    token: Option<String>,
    table_id: String,
}

#[derive(Deserialize)]
struct CreatedRow {
    id: i64,
}

impl BaserowTableService {
    pub fn new(base_url: String, token: Option<String>, table_id: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            table_id,
        }
    }

    fn rows_url(&self) -> String {
        format!("{}/api/database/rows/table/{}/?user_field_names=true", self.base_url, self.table_id)
    }

    fn row_url(&self, id: i64) -> String {
        format!("{}/api/database/rows/table/{}/{}/?user_field_names=true", self.base_url, self.table_id, id)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, AppError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| AppError::Upstream("Missing BASEROW_TOKEN".to_string()))?;
        Ok(request.header("Authorization", format!("Token {}", token)))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T, AppError> {
        let res: Response = self.authorized(request)?.send().await.map_err(|e| {
            let msg = format!("Remote table connection error ({}): {}", action, e);
            error!("{}", msg);
            AppError::Upstream(msg)
        })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Remote table {} failed. Status: {}, Body: {}", action, status, body);
            return Err(AppError::RemoteTable { status: status.as_u16(), body });
        }

        res.json::<T>().await.map_err(|e| {
            let msg = format!("Unexpected remote table response ({}): {}", action, e);
            error!("{}", msg);
            AppError::Upstream(msg)
        })
    }
}

#[async_trait]
impl RemoteTableService for BaserowTableService {
    async fn list_rows(&self) -> Result<Vec<TableRow>, AppError> {
        let page: TableRowPage = self.send(self.client.get(self.rows_url()), "list rows").await?;
        debug!("Fetched {} remote rows", page.results.len());
        Ok(page.results)
    }

    async fn get_row(&self, id: i64) -> Result<TableRow, AppError> {
        self.send(self.client.get(self.row_url(id)), "get row").await
    }

    async fn create_row(&self, fields: &TableRowFields) -> Result<i64, AppError> {
        let created: CreatedRow = self
            .send(self.client.post(self.rows_url()).json(fields), "create row")
            .await?;
        debug!("Created remote row {}", created.id);
        Ok(created.id)
    }

    async fn update_row(&self, id: i64, fields: &TableRowFields) -> Result<TableRow, AppError> {
        self.send(self.client.patch(self.row_url(id)).json(fields), "update row").await
    }

    async fn upload_file(&self, file_name: &str, data: Vec<u8>, mime: &str) -> Result<Photo, AppError> {
        let part = multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| AppError::Validation(format!("Invalid image type '{}': {}", mime, e)))?;
        let form = multipart::Form::new().part("file", part);
        let url = format!("{}/api/user-files/upload-file/", self.base_url);

        self.send(self.client.post(url).multipart(form), "upload file").await
    }
}
