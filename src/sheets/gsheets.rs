use reqwest::{Client, RequestBuilder, header};
use serde_json::{Value, json};

use crate::models::{record::Table, sheet::WorksheetRef};
use crate::parsing::table_values;
use crate::sheets::connection::SheetConnection;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Connection to one Google spreadsheet through the v4 REST API.
///
/// Worksheets are always resolved by zero-based index: the index is looked up
/// in the spreadsheet metadata and translated to the tab title the values
/// endpoints want. Addressing by tab name directly gets rejected before any
/// request is sent (the service answers 400 resource not found for names).
pub struct GsheetsConnection {
    client: Client,
    spreadsheet_id: String,
    token: Option<String>,
}

impl GsheetsConnection {
    pub fn new(spreadsheet_id: String, token: Option<String>) -> Result<Self, String> {
        let client = Client::builder()
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
                headers
            })
            .build()
            .map_err(|e| format!("Build of the sheets client failed. \n{}", e))?;

        Ok(GsheetsConnection { client, spreadsheet_id, token })
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token)
        } else {
            request
        }
    }

    /// Resolves a zero-based worksheet index to the tab title via the
    /// spreadsheet metadata endpoint.
    async fn worksheet_title(&self, index: u32) -> Result<String, String> {
        let url = format!("{}/{}?fields=sheets.properties", API_BASE, self.spreadsheet_id);

        let response = self
            .with_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| format!("Failed sending the spreadsheet metadata request. \n{}", e))?;

        if !response.status().is_success() {
            return Err(format!("Spreadsheet metadata request failed! {}", response.status()));
        }

        let meta: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse the spreadsheet metadata as JSON. \n{}", e))?;

        let sheets = meta
            .get("sheets")
            .and_then(|v| v.as_array())
            .ok_or_else(|| String::from("No sheets array in the spreadsheet metadata."))?;

        for sheet in sheets {
            let properties = match sheet.get("properties") {
                Some(p) => p,
                None => continue,
            };

            // The API omits "index" for the first sheet (defaults are dropped
            // from the response), so a missing index means 0.
            let sheet_index = properties.get("index").and_then(|v| v.as_u64()).unwrap_or(0);

            if sheet_index == index as u64 {
                return properties
                    .get("title")
                    .and_then(|v| v.as_str())
                    .map(str::to_owned)
                    .ok_or_else(|| format!("Worksheet {} has no title in the metadata.", index));
            }
        }

        Err(format!(
            "Worksheet index {} not found in spreadsheet {} ({} sheets).",
            index,
            self.spreadsheet_id,
            sheets.len()
        ))
    }
}

impl SheetConnection for GsheetsConnection {
    fn source_id(&self) -> &str {
        &self.spreadsheet_id
    }

    async fn read(&self, worksheet: &WorksheetRef) -> Result<Table, String> {
        let title = self.worksheet_title(worksheet.index()?).await?;

        let url = format!(
            "{}/{}/values/{}?valueRenderOption=UNFORMATTED_VALUE&dateTimeRenderOption=FORMATTED_STRING",
            API_BASE,
            self.spreadsheet_id,
            urlencoding::encode(&title)
        );

        let response = self
            .with_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| format!("Failed sending the worksheet read request. \n{}", e))?;

        if !response.status().is_success() {
            return Err(format!("Worksheet read request failed! {}", response.status()));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse the worksheet values as JSON. \n{}", e))?;

        table_values::table_from_values(&raw)
    }

    async fn update(&self, worksheet: &WorksheetRef, data: &Table) -> Result<Table, String> {
        let title = self.worksheet_title(worksheet.index()?).await?;
        let encoded_title = urlencoding::encode(&title).into_owned();

        // Whole-worksheet overwrite: clear first so rows removed elsewhere do
        // not linger below the new grid.
        let clear_url = format!("{}/{}/values/{}:clear", API_BASE, self.spreadsheet_id, encoded_title);

        let cleared = self
            .with_auth(self.client.post(&clear_url))
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| format!("Failed sending the worksheet clear request. \n{}", e))?;

        if !cleared.status().is_success() {
            return Err(format!("Worksheet clear request failed! {}", cleared.status()));
        }

        let put_url = format!(
            "{}/{}/values/{}?valueInputOption=RAW&includeValuesInResponse=true&responseValueRenderOption=UNFORMATTED_VALUE",
            API_BASE, self.spreadsheet_id, encoded_title
        );

        let body = json!({
            "range": title,
            "majorDimension": "ROWS",
            "values": table_values::values_from_table(data),
        });

        let response = self
            .with_auth(self.client.put(&put_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Failed sending the worksheet update request. \n{}", e))?;

        if !response.status().is_success() {
            return Err(format!("Worksheet update request failed! {}", response.status()));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse the update response as JSON. \n{}", e))?;

        // The written grid comes back under updatedData; fall back to what we
        // sent if the service left it out (it does for an all-empty write).
        match raw.get("updatedData") {
            Some(updated) => table_values::table_from_values(updated),
            None => Ok(data.clone()),
        }
    }
}
