use super::Rule;
use crate::style::{
	constructs::AttributeArguments,
	diagnostics::{Diagnostic, RuleId},
	lines::LineModel,
};

pub(crate) struct AttributesOwnLines;
impl AttributesOwnLines {
	/// Token indices of the arguments that should have started their own line.
	fn offenders(model: &LineModel, list: &AttributeArguments) -> Vec<usize> {
		let tokens = &model.tokens;
		let opener_line = tokens[list.open].start.line;
		let mut offenders = Vec::new();

		for pair in list.arguments.windows(2) {
			let start = tokens[pair[1].first].start.line;

			if start > opener_line && start == tokens[pair[0].last].end.line {
				offenders.push(pair[1].first);
			}
		}

		let on_opener_line =
			list.arguments.iter().filter(|arg| tokens[arg.first].start.line == opener_line).count();

		if on_opener_line > 1
			&& let Some(wrapped) =
				list.arguments.iter().find(|arg| tokens[arg.first].start.line > opener_line)
			&& !offenders.contains(&wrapped.first)
		{
			offenders.push(wrapped.first);
		}

		offenders
	}
}
impl Rule for AttributesOwnLines {
	fn id(&self) -> RuleId {
		RuleId::AttributesOwnLines
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		model
			.constructs
			.attribute_arguments
			.iter()
			.filter(|list| list.layout.is_multiline())
			.flat_map(|list| Self::offenders(model, list))
			.map(|token| Diagnostic::new(self.id(), model.tokens[token].start))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::style::rules;

	fn in_class(body: &str) -> String {
		format!("class Test\r\n{{{body}\r\n\t\t\t\tpublic Test( int i )\r\n\t\t\t\t{{\r\n\r\n\t\t\t\t}}\r\n}}")
	}

	#[test]
	fn shared_wrapped_line_reports_the_later_argument() {
		let text = in_class(
			"\r\n\t\t\t\t[PrincipalPermission( Role = \"Administrators\",\r\n\t\t\t\t\tAction = SecurityAction.Demand, Name = \"Something\" )]",
		);

		assert_eq!(rules::evaluate(&AttributesOwnLines, &text), vec![(4, 38)]);
	}

	#[test]
	fn crowded_opener_line_reports_the_first_wrapped_argument() {
		let text = in_class(
			"\r\n\t\t\t\t[PrincipalPermission( Role = \"Administrators\", Action = SecurityAction.Demand,\r\n\t\t\t\t\tName = \"Something\" )]",
		);

		assert_eq!(rules::evaluate(&AttributesOwnLines, &text), vec![(4, 6)]);
	}

	#[test]
	fn allowed_attribute_layouts() {
		for body in [
			"\r\n\t\t\t\t[Obsolete( Message = \"Obsolete.\", IsError = true )]",
			"\r\n\t\t\t\t[Obsolete(\r\n\t\t\t\t\tMessage = \"Obsolete.\",\r\n\t\t\t\t\tIsError = true )]",
			"\r\n\t\t\t\t[Obsolete( Message = \"Obsolete.\",\r\n\t\t\t\t\tIsError = true )]",
		] {
			assert_eq!(rules::evaluate(&AttributesOwnLines, &in_class(body)), vec![], "{body}");
		}
	}
}
