//! Canned reply text and the (topic, question type) response table.

use std::collections::HashMap;

use crate::knowledge::{QuestionType, Topic};

// =============================================================================
// Fixed replies
// =============================================================================

pub const FAREWELL: &str =
    "Goodbye! If you have more questions later, don't hesitate to ask. Have a great day!";

pub const GRATITUDE: &str = "You're welcome! Is there anything else you'd like to know?";

pub const LEARN_PROGRAMMING: &str = "To start learning programming, I recommend:\n1. Choose a language (Python is great for beginners)\n2. Use online resources like freeCodeCamp or Codecademy\n3. Practice with small projects\n4. Join coding communities\n\nWould you like specific resources for any programming language?";

pub const PROGRAMMING_LANGUAGES: &str = "Popular programming languages include:\n• Python - Great for beginners, AI, and data science\n• JavaScript - Essential for web development\n• Java - Popular for enterprise applications\n• C++ - Used in game development and system programming\n\nWhich one interests you the most?";

pub const DATABASE_DEFINITION: &str = "A database is a structured collection of data. MySQL, which we're using in this chatbot, is a popular open-source relational database. Would you like to know more about database types or specific MySQL commands?";

pub const DATABASE_HOWTO: &str = "To work with MySQL databases:\n1. Install MySQL Server\n2. Use MySQL Workbench or command line\n3. Learn basic SQL commands (SELECT, INSERT, UPDATE, DELETE)\n4. Practice database design\n\nWould you like a specific example?";

pub const FRONTEND_OVERVIEW: &str = "Frontend development involves:\n• HTML - Structure\n• CSS - Styling\n• JavaScript - Interactivity\n• Frameworks like React (what we're using!)\n\nWould you like to know more about any of these technologies?";

pub const BACKEND_OVERVIEW: &str = "Backend development includes:\n• Server (Node.js, Python, Java)\n• Databases (MySQL, MongoDB)\n• APIs\n• Server management\n\nI can provide more details about any of these aspects!";

pub const AI_OVERVIEW: &str = "Artificial Intelligence is a broad field that includes:\n• Machine Learning\n• Natural Language Processing\n• Computer Vision\n• Neural Networks\n\nI'm a chatbot using pattern matching to understand and respond to your questions. Would you like to learn more about any specific AI topic?";

// =============================================================================
// Templates
// =============================================================================

/// Time-of-day greeting for a local wall-clock hour (0-23).
pub fn greeting(hour: u32) -> String {
    let salutation = if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    };
    format!(
        "{}! How can I assist you today? Feel free to ask me about programming, databases, web development, or AI!",
        salutation
    )
}

/// Reply for a classified pair with no table entry.
pub fn topical_fallback(question: QuestionType, topic: Topic) -> String {
    format!(
        "I understand you're asking {} about {}. Could you please be more specific?",
        question, topic
    )
}

/// Reply when nothing matched. Echoes the utterance verbatim.
pub fn clarification(utterance: &str) -> String {
    format!(
        "I understand you're asking about \"{}\". To help you better, could you:\n1. Be more specific about what you'd like to know?\n2. Mention the topic area (programming, databases, web, AI)?\n3. Or ask \"help\" to see all available topics!",
        utterance
    )
}

// =============================================================================
// TopicalResponseTable
// =============================================================================

/// Sparse two-key lookup from (topic, question type) to canned text.
///
/// A missing entry is reported as `None`; callers render
/// [`topical_fallback`] for it.
#[derive(Debug, Clone, Default)]
pub struct TopicalResponseTable {
    entries: HashMap<(Topic, QuestionType), String>,
}

impl TopicalResponseTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, topic: Topic, question: QuestionType, text: impl Into<String>) -> Self {
        self.entries.insert((topic, question), text.into());
        self
    }

    pub fn lookup(&self, topic: Topic, question: QuestionType) -> Option<&str> {
        self.entries.get(&(topic, question)).map(String::as_str)
    }

    /// Table text for the pair, or the templated fallback if absent.
    pub fn respond(&self, topic: Topic, question: QuestionType) -> String {
        match self.lookup(topic, question) {
            Some(text) => text.to_string(),
            None => topical_fallback(question, topic),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stock table covering every topic and question type.
    pub fn builtin() -> Self {
        use QuestionType::*;
        use Topic::*;

        Self::empty()
            // programming
            .with_entry(Programming, What, "Programming is the process of creating computer software. It involves writing code in languages like Python, JavaScript, or Java. Would you like to know more about any specific language?")
            .with_entry(Programming, How, "To start programming:\n1. Choose a language\n2. Learn the basics (variables, loops, functions)\n3. Practice with small projects\n4. Use online resources and tutorials\n\nWould you like specific recommendations?")
            .with_entry(Programming, Who, "Programmers, developers, and software engineers are professionals who write code. They work in various fields like web development, mobile apps, AI, and more.")
            .with_entry(Programming, When, "You can start programming at any time! Many successful developers started as self-taught programmers. The best time to start is now!")
            .with_entry(Programming, Where, "You can learn programming:\n• Online platforms (Codecademy, freeCodeCamp)\n• Universities\n• Coding bootcamps\n• Self-study with documentation\n\nWould you like links to resources?")
            // database
            .with_entry(Database, What, "A database is a structured way to store and organize data. Common types include:\n• Relational (MySQL, PostgreSQL)\n• NoSQL (MongoDB, Redis)\n• Graph databases (Neo4j)\n\nWould you like to know more about any specific type?")
            .with_entry(Database, How, "To work with databases:\n1. Choose a database type\n2. Learn SQL for relational databases\n3. Understand data modeling\n4. Practice with sample datasets\n\nNeed more specific guidance?")
            .with_entry(Database, Who, "Database administrators (DBAs) and developers work with databases. They design, maintain, and optimize database systems.")
            .with_entry(Database, When, "Databases are used whenever you need to store and manage structured data systematically.")
            .with_entry(Database, Where, "You can set up databases:\n• Locally on your computer\n• On cloud platforms (AWS, Azure)\n• Using managed services\n\nWould you like to know more about any of these options?")
            // web
            .with_entry(Web, What, "Web development is creating websites and web applications. It includes:\n• Frontend (what users see)\n• Backend (server-side logic)\n• Databases\n• APIs\n\nWhich aspect interests you?")
            .with_entry(Web, How, "To become a web developer:\n1. Learn HTML, CSS, JavaScript\n2. Choose frontend or backend focus\n3. Learn frameworks (React, Node.js)\n4. Build projects\n\nWant more specific guidance?")
            .with_entry(Web, Who, "Web developers can be:\n• Frontend developers\n• Backend developers\n• Full-stack developers\n• UI/UX designers\n\nWould you like to know more about any role?")
            .with_entry(Web, When, "Web development is a constantly evolving field. The best time to start learning is now!")
            .with_entry(Web, Where, "You can learn web development:\n• Online platforms\n• Bootcamps\n• Universities\n• Self-study\n\nWould you like specific resource recommendations?")
            // ai
            .with_entry(Ai, What, "AI (Artificial Intelligence) is making computers perform tasks that typically require human intelligence. Key areas include:\n• Machine Learning\n• Natural Language Processing\n• Computer Vision\n\nWant to know more about any area?")
            .with_entry(Ai, How, "To get started with AI:\n1. Learn Python\n2. Study mathematics and statistics\n3. Learn ML frameworks\n4. Practice with datasets\n\nNeed more specific guidance?")
            .with_entry(Ai, Who, "AI professionals include:\n• ML Engineers\n• Data Scientists\n• AI Researchers\n• NLP Engineers\n\nInterested in any particular role?")
            .with_entry(Ai, When, "AI is rapidly evolving. Many companies are actively implementing AI solutions now.")
            .with_entry(Ai, Where, "You can learn AI:\n• Online courses (Coursera, edX)\n• Universities\n• Research institutions\n• Self-study resources\n\nWould you like specific recommendations?")
    }
}
