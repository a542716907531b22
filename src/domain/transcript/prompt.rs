//! Summarization prompt value object

/// System instruction for the summarization model
const SYSTEM_INSTRUCTION: &str = "You are an expert Indian real estate data analyst, well versed \
with the jargon and technicalities used in real estate transactions. You will be given call \
transcripts and you must provide a call summary along with the requested data in JSON format.";

/// Value object holding the prompts sent to the summarization model.
/// The user prompt embeds the transcript and pins the exact JSON shape the
/// pipeline parses (`dto` envelope with a fixed key set, string values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    user: String,
}

impl SummaryPrompt {
    /// Build the prompt pair for a transcript
    pub fn build(transcript: &str) -> Self {
        let user = format!(
            r#"Analyze this call transcript and extract the following information in JSON format:

Call Transcript: {transcript}

Required JSON Output:
{{
  "dto":
  {{
"Configuration": "",
"Size_Range": "",
"BSP": "",
"Total_Units": "",
"Units_available": "",
"Completion_Date": "",
"Additional_Notes": "",
"Notes": ""
}}
}}

Rules:
- All responses must be strings.
- If the developer says "90% sold" and the total is 100 units, then 10 units are available.
- "Configuration": list the BHK types mentioned, like "2,3".
- "Size_Range": the carpet area of the configurations as mentioned. If configurations 2 and 3 have carpets 750 and 1000, record "750-1000".
- "BSP": per square foot price, computed by dividing the price of a configuration by its carpet area. Average the value when multiple configurations are available.
- "Total_Units": total units planned in the project.
- "Units_available": total units still available for booking, as per the developer.
- "Completion_Date": the project completion time, or "Ready to Move" if completed.
- "Additional_Notes": an expert summary of the whole transcript covering everything said on the call.
- "Notes": one label for the call outcome. Use 'Call back' if the developer asked to call back or to reach someone else, 'Wrong number' for a wrong number, 'Voicemail' if the call hit voicemail or an answering machine. Use 'Successful' when configuration, price, area, total units and availability were provided, or when the developer reported the project sold out. Use 'Successful (absorption)' when price plus availability or sold-so-far information was given. Use 'Partial' when everything is known except availability or sold-so-far. Use 'Unsuccessful' when no unit, price, or availability information was given."#
        );

        Self { user }
    }

    /// The system instruction, shared by every request
    pub fn system() -> &'static str {
        SYSTEM_INSTRUCTION
    }

    /// The per-transcript user prompt
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Consume and return the user prompt
    pub fn into_user(self) -> String {
        self.user
    }
}
