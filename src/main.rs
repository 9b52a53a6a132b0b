mod apps;
use apps::{
    RenderPage,
    editor::{EditorAction, EditorApp},
    viewer::ViewerApp,
};

mod models;
use models::{record::Table, sheet::SheetInfo};

mod parsing;
use parsing::sheet_url;

mod secrets;
use secrets::{GSHEETS_TOKEN, SecretsDb, TEST_SECRET};

mod sheets;
use sheets::{connection::SheetConnection, gsheets::GsheetsConnection};

mod sheet_config;
use sheet_config::{SECRETS_DB_PATH, SHEET};

use std::error::Error;
use std::io::{BufRead, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_default();
    if mode != "read" && mode != "write" {
        println!("Usage: merch2sheet <read|write>");
        println!("  read   show the merchandise worksheet");
        println!("  write  show it newest-first and append generated rows on demand");
        return Ok(());
    }

    let sheet: SheetInfo = SHEET.clone();
    is_sheet_config_valid(&sheet)?;

    let db = SecretsDb::open(&SECRETS_DB_PATH)?;
    let secret_word = db.require(TEST_SECRET)?;
    let token = db.get(GSHEETS_TOKEN)?;
    if token.is_none() {
        println!("WARNING: No {} in the secrets db, reads only work on public sheets and writes will fail.", GSHEETS_TOKEN);
    }

    let spreadsheet_id = sheet_url::spreadsheet_id(&sheet.spreadsheet)?;
    let conn = GsheetsConnection::new(spreadsheet_id, token)?;

    if mode == "read" {
        let mut app = ViewerApp::new(conn, sheet, secret_word);
        print_page(&app.render().await?);
    } else {
        run_editor(EditorApp::new(conn, sheet, secret_word)).await?;
    }

    Ok(())
}

// -------------------------------------------------------------------------------------------

fn is_sheet_config_valid(sheet: &SheetInfo) -> Result<(), String> {
    sheet_url::spreadsheet_id(&sheet.spreadsheet)?;
    sheet.worksheet.index()?;

    if sheet.ttl_read_secs > 86400 {
        return Err(String::from(
            "ttl_read_secs is capped at 86400 (one day), anything longer and the view never refreshes.",
        ));
    }

    Ok(())
}

async fn run_editor<C: SheetConnection>(mut app: EditorApp<C>) -> Result<(), String> {
    print_page(&app.handle(EditorAction::Render).await?);

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("\n[u]pdate worksheet | [r]efresh | [q]uit > ");
        std::io::stdout().flush().map_err(|e| format!("Failed to flush stdout. \n{}", e))?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| format!("Failed reading from stdin. \n{}", e))?;
        if read == 0 {
            break; // EOF
        }

        match line.trim().to_lowercase().as_str() {
            "u" | "update" => {
                let page = app.handle(EditorAction::UpdateWorksheet).await?;
                println!("Worksheet updated.");
                print_page(&page);
            }
            "r" | "refresh" | "" => print_page(&app.handle(EditorAction::Render).await?),
            "q" | "quit" => break,
            other => println!("Don't know what to do with {:?}.", other),
        }
    }

    Ok(())
}

fn print_page(page: &RenderPage) {
    println!("\n{}", page.heading);
    println!("{}", page.secret_line);
    println!();
    print_table(&page.table);
}

fn print_table(table: &Table) {
    if table.is_empty() {
        println!("(worksheet is empty)");
        return;
    }

    let headers = ["Item", "Category", "Units", "Unit Cost", "Total", "Added"];

    let cells: Vec<[String; 6]> = table
        .rows
        .iter()
        .map(|r| {
            [
                r.item.clone(),
                r.category.clone(),
                r.units.to_string(),
                format!("{:.2}", r.unit_cost),
                format!("{:.2}", r.total),
                r.added.clone(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let print_row = |row: &[String]| {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<String>>()
            .join("  ");
        println!("{}", line.trim_end());
    };

    print_row(&headers.map(String::from));
    print_row(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<String>>());
    for row in &cells {
        print_row(row);
    }
}
