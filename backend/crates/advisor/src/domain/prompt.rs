//! Advisor Prompt

use kernel::money::Cents;

/// System prompt for the loan advisor
///
/// `balance` is embedded only when the deployment has opted in to sharing
/// it with the completion service.
pub fn system_prompt(customer_name: &str, balance: Option<Cents>) -> String {
    let mut context = format!("Customer: {customer_name}\n");
    if let Some(balance) = balance {
        context.push_str(&format!("Account Balance: {balance}\n"));
    }

    format!(
        "You are Bank X's AI loan advisor. Your role is to help customers with \
         loan-related queries and provide personalized advice.\n\
         \n\
         {context}\
         \n\
         ### Focus Areas:\n\
         1. Loan eligibility, interest rates, and documentation\n\
         2. Step-by-step loan application guidance\n\
         3. Repayment schedules, EMI calculations, and prepayment benefits\n\
         4. Special government schemes and compliance details\n\
         \n\
         Keep responses clear, professional, and user-friendly."
    )
}
