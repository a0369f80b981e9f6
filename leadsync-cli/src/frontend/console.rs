//! Interactive console menu
//!
//! Line-oriented so it can be driven by any `BufRead`; an error from one
//! action is printed and the menu keeps going.

use colored::*;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use super::{Action, Outcome, parse_property, submit};
use crate::api::{HubSpotClient, Lead};

const MENU: &str = "\n--- HubSpot Integration Test Menu ---\n\
1. Find contact by email\n\
2. Create or update contact\n\
3. Enroll contact in workflow\n\
4. Create deal for contact\n\
5. Exit test menu";

struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter<'_, R, W> {
    /// Print `label` and read one trimmed line; `None` on end of input
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_lead(&mut self) -> io::Result<Option<Lead>> {
        let Some(email) = self.ask("Email: ")? else {
            return Ok(None);
        };
        let Some(first_name) = self.ask("First Name: ")? else {
            return Ok(None);
        };
        let Some(last_name) = self.ask("Last Name: ")? else {
            return Ok(None);
        };
        let Some(company) = self.ask("Company: ")? else {
            return Ok(None);
        };
        let Some(phone) = self.ask("Phone: ")? else {
            return Ok(None);
        };
        Ok(Some(Lead {
            first_name,
            last_name,
            email,
            company,
            phone,
        }))
    }

    /// `key=value` lines until a blank line (or end of input)
    fn read_properties(&mut self) -> io::Result<BTreeMap<String, String>> {
        writeln!(
            self.output,
            "Enter deal properties (key=value), blank line to finish:"
        )?;
        let mut properties = BTreeMap::new();
        while let Some(line) = self.read_line()? {
            if line.is_empty() {
                break;
            }
            if let Some((key, value)) = parse_property(&line) {
                properties.insert(key, value);
            }
        }
        Ok(properties)
    }

    /// Collect the inputs for a menu choice. `Ok(None)` means input ended.
    fn read_action(&mut self, choice: &str) -> io::Result<Option<Action>> {
        let action = match choice {
            "1" => self
                .ask("Enter email to search: ")?
                .map(|email| Action::FindContact { email }),
            "2" => self.read_lead()?.map(|lead| Action::UpsertContact { lead }),
            "3" => {
                let Some(contact_id) = self.ask("Contact ID: ")? else {
                    return Ok(None);
                };
                self.ask("Workflow ID: ")?.map(|workflow_id| Action::Enroll {
                    contact_id,
                    workflow_id,
                })
            }
            "4" => {
                let Some(contact_id) = self.ask("Contact ID: ")? else {
                    return Ok(None);
                };
                let properties = self.read_properties()?;
                Some(Action::CreateDeal {
                    contact_id,
                    properties,
                })
            }
            _ => None,
        };
        Ok(action)
    }
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Contact(_) => format!("Result: {}", outcome),
        _ => outcome.to_string(),
    }
}

/// Run the menu until the user picks "5" or input ends
pub async fn run_menu<R: BufRead, W: Write>(
    client: &HubSpotClient,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let mut prompter = Prompter { input, output };
    writeln!(prompter.output, "{}", MENU)?;

    loop {
        let Some(choice) = prompter.ask("\nSelect an option (1-5): ")? else {
            break;
        };

        match choice.as_str() {
            "5" => {
                writeln!(prompter.output, "Exiting test menu.")?;
                break;
            }
            "1" | "2" | "3" | "4" => {
                let Some(action) = prompter.read_action(&choice)? else {
                    break;
                };
                match submit(client, action).await {
                    Ok(outcome) => writeln!(prompter.output, "{}", describe(&outcome))?,
                    Err(e) => writeln!(prompter.output, "{} {}", "Error:".red(), e)?,
                }
            }
            _ => writeln!(prompter.output, "Invalid option. Please select 1-5.")?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::Operation;
    use crate::api::testing::MockTransport;
    use crate::config::SyncConfig;
    use serde_json::json;
    use std::io::Cursor;
    use std::sync::Arc;

    async fn run(transport: &Arc<MockTransport>, script: &str) -> String {
        let config = SyncConfig::builder().access_token("t").build();
        let client = HubSpotClient::with_transport(transport.clone(), &config);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        run_menu(&client, &mut input, &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_find_then_exit() {
        let transport = MockTransport::new();
        transport.push_json(200, json!({"results": []}));

        let output = run(&transport, "1\na@x.com\n5\n").await;

        assert!(output.contains("1. Find contact by email"));
        assert!(output.contains("Result: No contact found."));
        assert!(output.contains("Exiting test menu."));
        assert!(output.contains("5. Exit test menu"));
    }

    #[tokio::test]
    async fn test_upsert_reads_fields_in_prompt_order() {
        let transport = MockTransport::new();
        transport.push_json(200, json!({"results": []}));
        transport.push_json(201, json!({"id": "1", "properties": {}}));

        let output = run(&transport, "2\n a@x.com \nA\nB\nC\n555\n5\n").await;

        assert!(output.contains("Contact created/updated:"));
        assert_eq!(
            transport.requests()[1],
            Operation::create_contact(Lead::new("A", "B", "a@x.com", "C", "555"))
        );
    }

    #[tokio::test]
    async fn test_error_is_printed_and_loop_continues() {
        let transport = MockTransport::new();
        transport.push(404, "workflow not found");
        transport.push(204, "");

        let output = run(&transport, "3\n1\n2\n3\n1\n2\n5\n").await;

        assert!(output.contains("Error:"));
        assert!(output.contains("workflow not found"));
        assert!(output.contains("Enrolled in workflow."));
    }

    #[tokio::test]
    async fn test_deal_properties_until_blank_line() {
        let transport = MockTransport::new();
        transport.push_json(201, json!({"id": "d1"}));

        let output = run(&transport, "4\n42\namount=100\nnot a pair\ndealstage = open\n\n5\n").await;

        assert!(output.contains("Deal created:"));
        let expected = BTreeMap::from([
            ("amount".to_string(), "100".to_string()),
            ("dealstage".to_string(), "open".to_string()),
        ]);
        assert_eq!(transport.requests(), vec![Operation::create_deal("42", expected)]);
    }

    #[tokio::test]
    async fn test_invalid_option_and_eof() {
        let transport = MockTransport::new();

        let output = run(&transport, "9\n").await;

        assert!(output.contains("Invalid option. Please select 1-5."));
        assert!(transport.requests().is_empty());
    }
}
